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

//! Decode a configuration file given on the command line.
//!
//! ```text
//! cargo run -p confdec --example quick_start -- app.conf
//! ```
//!
//! Without an argument a built-in sample is decoded instead.

use confdec::{decode_str, parse_file, DecodeOptions, DecodeResultExt, Record};

#[derive(Record, Debug, Default)]
struct Endpoint {
    host: String,
    port: u16,
}

#[derive(Record, Debug, Default)]
struct AppConfig {
    name: String,
    workers: u32,
    #[confdec(rename = "allow")]
    allowed: Vec<String>,
    backoff_ms: Vec<u64>,
    endpoint: Endpoint,
}

const SAMPLE: &str = "\
# sample application
name demo
workers 4
allow [10.0.0.1, 10.0.0.2]
backoff_ms 100,200,400
host localhost
port 8080
";

fn main() -> Result<(), confdec::DecodeError> {
    let mut config = AppConfig::default();

    match std::env::args().nth(1) {
        Some(path) => {
            let model = parse_file(&path)?;
            println!("{} keys in {}", model.len(), path);
            model
                .decode_to(&mut config)
                .with_context(|| format!("while decoding {}", path))?;
        }
        None => decode_str(SAMPLE, &mut config, &DecodeOptions::default())?,
    }

    println!("{:#?}", config);
    Ok(())
}
