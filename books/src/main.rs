// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Entry point to the bookshelf service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf::db::init_schema;
use bookshelf::serve;
use bookshelf_core::db::mysql::{MySqlDb, MySqlOptions};
use bookshelf_core::db::Db;
use bookshelf_core::env::{get_optional_var, load_dotenv};
use log::error;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Default port to listen on when `BOOKSHELF_PORT` is not set.
const DEFAULT_PORT: u16 = 3000;

/// Gathers the configuration from the environment and runs the service until it terminates.
async fn run() -> Result<(), String> {
    let port = get_optional_var::<u16>("BOOKSHELF", "PORT")?.unwrap_or(DEFAULT_PORT);
    let addr = (Ipv4Addr::LOCALHOST, port);

    let db_opts = MySqlOptions::from_env("DB")?;
    let db = Arc::new(MySqlDb::connect(db_opts).map_err(|e| e.to_string())?);
    {
        let mut ex = db.ex().await.map_err(|e| e.to_string())?;
        init_schema(&mut ex).await.map_err(|e| e.to_string())?;
    }

    serve(addr, db).await.map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    // Loaded before the logger so that `RUST_LOG` can come from the file too.
    let dotenv = load_dotenv();
    env_logger::init();

    if let Err(e) = dotenv {
        error!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}
