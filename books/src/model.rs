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

//! High-level data types.

use derive_getters::{Dissolve, Getters};
use derive_more::{AsRef, Constructor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use time::Date;

/// Newtype pattern for the identifiers of the books, which are assigned by the database.
#[derive(AsRef, Clone, Constructor, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd)]
#[derive(Serialize)]
#[serde(transparent)]
pub(crate) struct BookId(i32);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book as stored in the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Book {
    /// Identifier of the book.
    id: BookId,

    /// Title of the book.
    title: String,

    /// Author of the book.
    author: String,

    /// Year in which the book was published.  Not validated: it can be negative.
    year_published: i32,
}

/// Contents of a book as supplied by a client.
///
/// The `id` is optional because clients cannot choose the identifier of new books.  Updates,
/// however, honor the identifier if it is present.
#[derive(Constructor, Deserialize, Dissolve, Getters)]
#[cfg_attr(test, derive(Debug, PartialEq, Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookData {
    /// Identifier requested by the client, if any.
    id: Option<BookId>,

    /// Title of the book.
    title: String,

    /// Author of the book.
    author: String,

    /// Year in which the book was published.
    year_published: i32,
}

impl BookData {
    /// Converts this data into a `Book` with the given `id`.
    pub(crate) fn into_book(self, id: BookId) -> Book {
        let (_, title, author, year_published) = self.dissolve();
        Book::new(id, title, author, year_published)
    }
}

/// A single day of the weather forecast.
#[derive(Constructor, Debug, Getters, PartialEq)]
pub(crate) struct WeatherForecast {
    /// Day for which this forecast applies.
    date: Date,

    /// Temperature in Celsius degrees.
    temperature_c: i32,

    /// Human-readable description of the temperature.
    #[getter(skip)]
    summary: &'static str,
}

impl WeatherForecast {
    /// Returns the human-readable description of the temperature.
    pub(crate) fn summary(&self) -> &'static str {
        self.summary
    }

    /// Returns the temperature in Fahrenheit degrees, truncated towards zero.
    pub(crate) fn temperature_f(&self) -> i32 {
        32 + (f64::from(self.temperature_c) / 0.5556) as i32
    }
}

impl Serialize for WeatherForecast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("WeatherForecast", 4)?;
        state.serialize_field("date", &self.date.to_string())?;
        state.serialize_field("temperatureC", &self.temperature_c)?;
        state.serialize_field("temperatureF", &self.temperature_f())?;
        state.serialize_field("summary", self.summary)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn test_book_json_uses_camel_case() {
        let book = Book::new(BookId::new(7), "Title".to_owned(), "Author".to_owned(), -100);
        assert_eq!(
            json!({"id": 7, "title": "Title", "author": "Author", "yearPublished": -100}),
            serde_json::to_value(&book).unwrap()
        );
    }

    #[test]
    fn test_book_data_id_is_optional() {
        let data: BookData =
            serde_json::from_str(r#"{"title": "T", "author": "A", "yearPublished": 1}"#).unwrap();
        assert_eq!(BookData::new(None, "T".to_owned(), "A".to_owned(), 1), data);

        let data: BookData =
            serde_json::from_str(r#"{"id": 3, "title": "T", "author": "A", "yearPublished": 1}"#)
                .unwrap();
        assert_eq!(BookData::new(Some(BookId::new(3)), "T".to_owned(), "A".to_owned(), 1), data);
    }

    #[test]
    fn test_book_data_fields_are_required() {
        serde_json::from_str::<BookData>(r#"{"title": "T", "yearPublished": 1}"#).unwrap_err();
    }

    #[test]
    fn test_book_data_into_book() {
        let data = BookData::new(Some(BookId::new(3)), "T".to_owned(), "A".to_owned(), 1);
        assert_eq!(
            Book::new(BookId::new(8), "T".to_owned(), "A".to_owned(), 1),
            data.into_book(BookId::new(8))
        );
    }

    #[test]
    fn test_weather_forecast_temperature_f() {
        let forecast = |c| WeatherForecast::new(date!(2024 - 01 - 01), c, "Mild");
        assert_eq!(32, forecast(0).temperature_f());
        assert_eq!(-3, forecast(-20).temperature_f());
        assert_eq!(49, forecast(10).temperature_f());
        assert_eq!(129, forecast(54).temperature_f());
    }

    #[test]
    fn test_weather_forecast_summary_outlives_forecast() {
        let summary: &'static str = {
            let forecast = WeatherForecast::new(date!(2024 - 01 - 01), 3, "Chilly");
            forecast.summary()
        };
        assert_eq!("Chilly", summary);
    }

    #[test]
    fn test_weather_forecast_json() {
        let forecast = WeatherForecast::new(date!(2024 - 03 - 09), 25, "Warm");
        let exp_json = json!({
            "date": "2024-03-09",
            "temperatureC": 25,
            "temperatureF": 76,
            "summary": "Warm",
        });
        assert_eq!(exp_json, serde_json::to_value(&forecast).unwrap());
    }
}
