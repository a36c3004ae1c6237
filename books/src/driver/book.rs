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

//! Operations on one book.

use crate::db;
use crate::driver::Driver;
use crate::model::{Book, BookData, BookId};
use bookshelf_core::driver::DriverResult;
use log::warn;

impl Driver {
    /// Deletes the book identified by `id`.
    pub(crate) async fn delete_book(self, id: BookId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_book(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Gets the book identified by `id`.
    pub(crate) async fn get_book(self, id: BookId) -> DriverResult<Book> {
        let book = db::get_book(&mut self.db.ex().await?, id).await?;
        Ok(book)
    }

    /// Overwrites all fields of the existing book identified by `id` with `data`.
    ///
    /// If `data` carries an identifier, the book is moved to it.
    pub(crate) async fn update_book(self, id: BookId, data: BookData) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::get_book(tx.ex(), id).await?;

        let new_id = match data.id() {
            Some(new_id) => {
                if *new_id != id {
                    warn!("Update of book {} changes its id to {}", id, new_id);
                }
                *new_id
            }
            None => id,
        };
        let book = data.into_book(new_id);
        db::update_book(tx.ex(), id, &book).await?;

        tx.commit().await?;
        Ok(())
    }
}
