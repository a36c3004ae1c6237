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

//! Shared building blocks for the bookshelf web service.
//!
//! The service is split in layers, each in a module of the same name, and every layer only talks
//! to the one right below it:
//!
//! 1.  `model`: plain data types for the domain concepts.  Services own this layer entirely.
//!
//! 1.  `db`: persistence.  Queries are free functions that receive an `Executor` and contain one
//!     arm per supported backend (MySQL in production, SQLite in tests).
//!
//! 1.  `driver`: business logic.  A `Driver` owns the handles to the database and to the clock and
//!     runs each operation inside its own transaction.
//!
//! 1.  `rest`: the axum handlers that expose the driver over HTTP.
//!
//! 1.  `main`: reads the configuration from the environment and calls `serve`.
//!
//! Each layer has its own error type (`DbError`, `DriverError`, `RestError`...) and converts the
//! errors of the layer below with `From`, so `?` carries failures all the way up to an HTTP status.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod rest;
