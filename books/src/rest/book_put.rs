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

//! API to update an existing book.

use crate::driver::Driver;
use crate::model::{BookData, BookId};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http;
use bookshelf_core::rest::{parse_optional_json, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<BookId>,
    body: Bytes,
) -> Result<http::StatusCode, RestError> {
    let data = match parse_optional_json::<BookData>(&body)? {
        Some(data) => data,
        None => return Err(RestError::InvalidRequest("Missing book in request body".to_owned())),
    };

    driver.update_book(id, data).await?;

    Ok(http::StatusCode::NO_CONTENT)
}
