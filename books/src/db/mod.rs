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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::{Book, BookId};
#[cfg(feature = "mysql")]
use bookshelf_core::db::mysql;
#[cfg(any(feature = "sqlite", test))]
use bookshelf_core::db::sqlite;
use bookshelf_core::db::{DbError, DbResult, Executor};
use futures::TryStreamExt;
use log::info;
#[cfg(feature = "mysql")]
use sqlx::mysql::MySqlRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use sqlx::Row;


/// Checks if the `books` table exists.
async fn has_books_table(ex: &mut Executor) -> DbResult<bool> {
    let count: i64 = match ex {
        #[cfg(feature = "mysql")]
        Executor::MySql(ex) => {
            let query_str = "
                SELECT COUNT(*) AS count FROM information_schema.tables
                WHERE table_schema = DATABASE() AND table_name = 'books'
            ";
            let row = sqlx::query(query_str)
                .fetch_one(ex.conn())
                .await
                .map_err(mysql::map_sqlx_error)?;
            row.try_get("count").map_err(mysql::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT COUNT(*) AS count FROM sqlite_master
                WHERE type = 'table' AND name = 'books'
            ";
            let row = sqlx::query(query_str)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(count > 0)
}

/// Initializes the database schema.
///
/// The schema comes with a few sample books.  These are only inserted when the `books` table is
/// created, so calling this on an already-initialized database is a no-op.  Creating the table and
/// inserting the samples are not atomic on MySQL: if the process dies in between, the table stays
/// empty.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    if has_books_table(ex).await? {
        return Ok(());
    }

    info!("Creating database schema and seeding sample books");
    match ex {
        #[cfg(feature = "mysql")]
        Executor::MySql(ex) => mysql::run_schema(ex, include_str!("mysql.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Converts a storage-assigned row identifier into a `BookId`.
fn book_id_from_row_id<T>(row_id: T) -> DbResult<BookId>
where
    T: Copy + std::fmt::Display,
    i32: TryFrom<T>,
{
    match i32::try_from(row_id) {
        Ok(id) => Ok(BookId::new(id)),
        Err(_) => Err(DbError::DataIntegrityError(format!("Book id {} out of range", row_id))),
    }
}

#[cfg(feature = "mysql")]
impl TryFrom<MySqlRow> for Book {
    type Error = DbError;

    fn try_from(row: MySqlRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(mysql::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(mysql::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(mysql::map_sqlx_error)?;
        let year_published: i32 = row.try_get("year_published").map_err(mysql::map_sqlx_error)?;
        Ok(Book::new(BookId::new(id), title, author, year_published))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Book {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(sqlite::map_sqlx_error)?;
        let year_published: i32 = row.try_get("year_published").map_err(sqlite::map_sqlx_error)?;
        Ok(Book::new(BookId::new(id), title, author, year_published))
    }
}

/// Gets all books, sorted by their identifier.
pub(crate) async fn get_books(ex: &mut Executor) -> DbResult<Vec<Book>> {
    let query_str = "SELECT id, title, author, year_published FROM books ORDER BY id";
    let mut books = vec![];
    match ex {
        #[cfg(feature = "mysql")]
        Executor::MySql(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(mysql::map_sqlx_error)? {
                books.push(Book::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                books.push(Book::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(books)
}

/// Gets the book identified by `id`.
pub(crate) async fn get_book(ex: &mut Executor, id: BookId) -> DbResult<Book> {
    let query_str = "SELECT id, title, author, year_published FROM books WHERE id = ?";
    match ex {
        #[cfg(feature = "mysql")]
        Executor::MySql(ex) => {
            let row = sqlx::query(query_str)
                .bind(id.as_ref())
                .fetch_one(ex.conn())
                .await
                .map_err(mysql::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let row = sqlx::query(query_str)
                .bind(id.as_ref())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Creates a new book with the given contents and returns it with its assigned identifier.
pub(crate) async fn create_book(
    ex: &mut Executor,
    title: String,
    author: String,
    year_published: i32,
) -> DbResult<Book> {
    let query_str = "INSERT INTO books (title, author, year_published) VALUES (?, ?, ?)";
    let id = match ex {
        #[cfg(feature = "mysql")]
        Executor::MySql(ex) => {
            let done = sqlx::query(query_str)
                .bind(&title)
                .bind(&author)
                .bind(year_published)
                .execute(ex.conn())
                .await
                .map_err(mysql::map_sqlx_error)?;
            book_id_from_row_id(done.last_insert_id())?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query(query_str)
                .bind(&title)
                .bind(&author)
                .bind(year_published)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            book_id_from_row_id(done.last_insert_rowid())?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(Book::new(id, title, author, year_published))
}

/// Overwrites the book identified by `id` with the contents of `book`, including its identifier.
pub(crate) async fn update_book(ex: &mut Executor, id: BookId, book: &Book) -> DbResult<()> {
    let query_str = "
        UPDATE books SET id = ?, title = ?, author = ?, year_published = ?
        WHERE id = ?
    ";
    let rows_affected = match ex {
        #[cfg(feature = "mysql")]
        Executor::MySql(ex) => {
            let done = sqlx::query(query_str)
                .bind(book.id().as_ref())
                .bind(book.title())
                .bind(book.author())
                .bind(book.year_published())
                .bind(id.as_ref())
                .execute(ex.conn())
                .await
                .map_err(mysql::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query(query_str)
                .bind(book.id().as_ref())
                .bind(book.title())
                .bind(book.author())
                .bind(book.year_published())
                .bind(id.as_ref())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Update affected more than one row".to_owned())),
    }
}

/// Deletes the book identified by `id`.
pub(crate) async fn delete_book(ex: &mut Executor, id: BookId) -> DbResult<()> {
    let query_str = "DELETE FROM books WHERE id = ?";
    let rows_affected = match ex {
        #[cfg(feature = "mysql")]
        Executor::MySql(ex) => {
            let done = sqlx::query(query_str)
                .bind(id.as_ref())
                .execute(ex.conn())
                .await
                .map_err(mysql::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query(query_str)
                .bind(id.as_ref())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}
