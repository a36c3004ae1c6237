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

//! API to create a new book.

use crate::driver::Driver;
use crate::model::BookData;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{http, Json};
use bookshelf_core::rest::{parse_optional_json, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    body: Bytes,
) -> Result<impl IntoResponse, RestError> {
    let data = match parse_optional_json::<BookData>(&body)? {
        Some(data) => data,
        None => return Err(RestError::InvalidRequest("Missing book in request body".to_owned())),
    };

    let book = driver.create_book(data).await?;

    let location = format!("/api/books/{}", book.id());
    Ok((http::StatusCode::CREATED, [(http::header::LOCATION, location)], Json(book)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::seed_books;
    use crate::model::*;
    use crate::rest::testutils::*;
    use bookshelf_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/api/books".to_owned())
    }

    #[tokio::test]
    async fn test_create() {
        let context = TestContext::setup().await;

        let request = BookData::new(None, "Ulysses".to_owned(), "James Joyce".to_owned(), 1922);
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(&request)
            .await
            .expect_status(http::StatusCode::CREATED);
        let location = response.header(http::header::LOCATION).unwrap();
        let book = response.expect_json::<Book>().await;
        assert_eq!(format!("/api/books/{}", book.id()), location);
        assert_eq!("Ulysses", book.title());
        assert_eq!("James Joyce", book.author());
        assert_eq!(1922, *book.year_published());

        assert_eq!(Some(book.clone()), context.get_book(*book.id().as_ref()).await);

        let get_route = (http::Method::GET, location);
        let fetched = OneShotBuilder::new(context.app(), get_route)
            .send_empty()
            .await
            .expect_json::<Book>()
            .await;
        assert_eq!(book, fetched);
    }

    #[tokio::test]
    async fn test_ignores_requested_id() {
        let context = TestContext::setup().await;

        let request =
            BookData::new(Some(BookId::new(3)), "Beowulf".to_owned(), "Unknown".to_owned(), 1000);
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(&request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Book>()
            .await;
        assert_ne!(BookId::new(3), *response.id());

        assert_eq!(Some(seed_books()[2].clone()), context.get_book(3).await);
        assert_eq!(6, context.get_books().await.len());
    }

    #[tokio::test]
    async fn test_negative_year() {
        let context = TestContext::setup().await;

        let request = BookData::new(None, "Aeneid".to_owned(), "Virgil".to_owned(), -100);
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(&request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Book>()
            .await;
        assert_eq!(-100, *response.year_published());

        let stored = context.get_book(*response.id().as_ref()).await.unwrap();
        assert_eq!(-100, *stored.year_published());
    }

    #[tokio::test]
    async fn test_absent_payload() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Missing book")
            .await;

        assert_eq!(seed_books(), context.get_books().await);
    }

    #[tokio::test]
    async fn test_null_payload() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_text("null")
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Missing book")
            .await;

        assert_eq!(seed_books(), context.get_books().await);
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_text("this is not json")
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("expected")
            .await;

        OneShotBuilder::new(context.app(), route())
            .send_json(serde_json::json!({"title": "No author", "yearPublished": 2000}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("missing field .author.")
            .await;

        assert_eq!(seed_books(), context.get_books().await);
    }
}
