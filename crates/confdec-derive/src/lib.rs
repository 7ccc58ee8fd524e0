// Dweve Confdec - Line-Oriented Configuration Decoder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Confdec Derive Macros
//!
//! Provides `#[derive(Record)]`, which generates the field table the binder
//! walks. Use it through the `confdec` crate, which re-exports it.
//!
//! Field attributes:
//!
//! - `#[confdec(rename = "key")]` matches the field against `key` instead of
//!   its identifier.
//! - `#[confdec(skip)]` keeps the field in the table but never writes it.

use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derives `confdec::Record` and `confdec::FieldSlot` for a struct with
/// named fields.
#[proc_macro_derive(Record, attributes(confdec))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

struct FieldSpec {
    ident: syn::Ident,
    ty: syn::Type,
    key: String,
    skip: bool,
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let data_struct = match &input.data {
        Data::Struct(ds) => ds,
        _ => {
            return Err(syn::Error::new(
                name.span(),
                "Record only supports structs",
            ));
        }
    };

    let specs = match &data_struct.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(field_spec)
            .collect::<syn::Result<Vec<_>>>()?,
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new(
                name.span(),
                "Record requires named fields; tuple structs have no keys to match",
            ));
        }
    };

    let entries = specs.iter().map(|spec| {
        let key = &spec.key;
        if spec.skip {
            quote! { ::confdec::Field::new(#key, ::confdec::Slot::Skip) }
        } else {
            let ident = &spec.ident;
            quote! { ::confdec::Field::new(#key, ::confdec::FieldSlot::slot(&mut self.#ident)) }
        }
    });

    let record_name = name.to_string();
    let generics = add_field_bounds(&input.generics, &specs);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::confdec::Record for #name #ty_generics #where_clause {
            fn record_name(&self) -> &'static str {
                #record_name
            }

            fn fields(&mut self) -> ::std::vec::Vec<::confdec::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }

        impl #impl_generics ::confdec::FieldSlot for #name #ty_generics #where_clause {
            fn slot(&mut self) -> ::confdec::Slot<'_> {
                ::confdec::Slot::Record(self)
            }
        }
    })
}

/// Adds `FieldTy: FieldSlot` for every bound field whose type names a
/// type parameter, so `struct W<T> { inner: T }` needs no handwritten bounds.
fn add_field_bounds(generics: &syn::Generics, specs: &[FieldSpec]) -> syn::Generics {
    let params: Vec<String> = generics
        .type_params()
        .map(|param| param.ident.to_string())
        .collect();
    let mut generics = generics.clone();
    if params.is_empty() {
        return generics;
    }

    let where_clause = generics.make_where_clause();
    for spec in specs.iter().filter(|spec| !spec.skip) {
        if mentions_param(spec.ty.to_token_stream(), &params) {
            let ty = &spec.ty;
            where_clause
                .predicates
                .push(syn::parse_quote! { #ty: ::confdec::FieldSlot });
        }
    }
    generics
}

fn mentions_param(tokens: proc_macro2::TokenStream, params: &[String]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        proc_macro2::TokenTree::Ident(ident) => params.iter().any(|p| ident == p),
        proc_macro2::TokenTree::Group(group) => mentions_param(group.stream(), params),
        _ => false,
    })
}

fn field_spec(field: &syn::Field) -> syn::Result<FieldSpec> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Record requires named fields"))?;
    let (rename, skip) = parse_attributes(&field.attrs)?;

    let key = match rename {
        Some(key) => key,
        None => {
            let raw = ident.to_string();
            raw.strip_prefix("r#").unwrap_or(&raw).to_string()
        }
    };

    Ok(FieldSpec {
        ident,
        ty: field.ty.clone(),
        key,
        skip,
    })
}

/// Parses `#[confdec(...)]`. Returns (rename, skip).
fn parse_attributes(attrs: &[Attribute]) -> syn::Result<(Option<String>, bool)> {
    let mut rename = None;
    let mut skip = false;

    for attr in attrs {
        if attr.path().is_ident("confdec") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    return Ok(());
                }

                if meta.path.is_ident("rename") {
                    let s: LitStr = meta.value()?.parse()?;
                    let key = s.value();
                    if key.is_empty() || key.chars().any(char::is_whitespace) {
                        return Err(meta.error("rename key must be non-empty and contain no whitespace"));
                    }
                    rename = Some(key);
                    return Ok(());
                }

                Err(meta.error("Unknown confdec attribute key. Supported: rename, skip"))
            })?;
        }
    }
    Ok((rename, skip))
}
