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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use bookshelf_core::clocks::testutils::SettableClock;
use bookshelf_core::db::{Db, DbError};
use std::sync::Arc;
use time::macros::datetime;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app, for direct access to the data.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the app.
    clock: Arc<SettableClock>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database seeded with the sample books.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(bookshelf_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(datetime!(2024-05-10 08:00:00 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        let app = app(driver);
        Self { db, clock, app }
    }

    /// Returns a copy of the app under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app under test.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Returns the clock used by the app.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Inserts a book directly into the database and returns it.
    pub(crate) async fn create_book<T: Into<String>, A: Into<String>>(
        &self,
        title: T,
        author: A,
        year_published: i32,
    ) -> Book {
        let mut ex = self.db.ex().await.unwrap();
        db::create_book(&mut ex, title.into(), author.into(), year_published).await.unwrap()
    }

    /// Gets the book identified by `id` directly from the database, if it exists.
    pub(crate) async fn get_book(&self, id: i32) -> Option<Book> {
        match db::get_book(&mut self.db.ex().await.unwrap(), BookId::new(id)).await {
            Ok(book) => Some(book),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets all books directly from the database.
    pub(crate) async fn get_books(&self) -> Vec<Book> {
        db::get_books(&mut self.db.ex().await.unwrap()).await.unwrap()
    }
}
