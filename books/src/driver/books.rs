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

//! Operations on the collection of books.

use crate::db;
use crate::driver::Driver;
use crate::model::{Book, BookData};
use bookshelf_core::driver::DriverResult;

impl Driver {
    /// Gets all books, sorted by their identifier.
    pub(crate) async fn get_books(self) -> DriverResult<Vec<Book>> {
        let books = db::get_books(&mut self.db.ex().await?).await?;
        Ok(books)
    }

    /// Creates a new book from `data` and returns it with its assigned identifier.
    ///
    /// Any identifier in `data` is ignored because identifiers are assigned by the database.
    pub(crate) async fn create_book(self, data: BookData) -> DriverResult<Book> {
        let (_, title, author, year_published) = data.dissolve();

        let mut tx = self.db.begin().await?;
        let book = db::create_book(tx.ex(), title, author, year_published).await?;
        tx.commit().await?;
        Ok(book)
    }
}
