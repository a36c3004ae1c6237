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

//! Operations to obtain a weather forecast.

use crate::driver::Driver;
use crate::model::WeatherForecast;
use bookshelf_core::driver::{DriverError, DriverResult};
use rand::Rng;
use time::{Date, Duration};

/// Number of days covered by a forecast, starting tomorrow.
const FORECAST_DAYS: i64 = 5;

/// Range of the generated temperatures, in Celsius degrees.
const TEMPERATURE_RANGE_C: std::ops::Range<i32> = -20..55;

/// Possible descriptions for the temperatures.
const SUMMARIES: &[&str] = &[
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Generates a random forecast for the days that follow `today` using `rng`.
fn generate_forecast<R: Rng>(rng: &mut R, today: Date) -> DriverResult<Vec<WeatherForecast>> {
    let mut forecast = Vec::with_capacity(FORECAST_DAYS as usize);
    for i in 1..=FORECAST_DAYS {
        let date = today.checked_add(Duration::days(i)).ok_or_else(|| {
            DriverError::InvalidInput(format!("Cannot compute the date {} days after {}", i, today))
        })?;
        let temperature_c = rng.gen_range(TEMPERATURE_RANGE_C);
        let summary = SUMMARIES[rng.gen_range(0..SUMMARIES.len())];
        forecast.push(WeatherForecast::new(date, temperature_c, summary));
    }
    Ok(forecast)
}

impl Driver {
    /// Gets a made-up weather forecast for the next few days.
    pub(crate) async fn get_weather_forecast(self) -> DriverResult<Vec<WeatherForecast>> {
        let today = self.clock.now_utc().date();
        generate_forecast(&mut rand::thread_rng(), today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use time::macros::{date, datetime};

    #[test]
    fn test_generate_forecast_values_in_range() {
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..100 {
            let forecast = generate_forecast(&mut rng, date!(2024 - 01 - 01)).unwrap();
            assert_eq!(5, forecast.len());
            for day in forecast {
                assert!(TEMPERATURE_RANGE_C.contains(day.temperature_c()));
                assert!(SUMMARIES.contains(&day.summary()));
            }
        }
    }

    #[test]
    fn test_generate_forecast_covers_all_values() {
        let mut rng = StdRng::seed_from_u64(5678);
        let mut temperatures = HashSet::new();
        let mut summaries = HashSet::new();
        for _ in 0..1000 {
            for day in generate_forecast(&mut rng, date!(2024 - 01 - 01)).unwrap() {
                temperatures.insert(*day.temperature_c());
                summaries.insert(day.summary());
            }
        }
        assert_eq!(75, temperatures.len());
        assert!(temperatures.contains(&-20));
        assert!(temperatures.contains(&54));
        assert!(!temperatures.contains(&55));
        assert_eq!(SUMMARIES.len(), summaries.len());
    }

    #[test]
    fn test_generate_forecast_dates_cross_month_boundary() {
        let mut rng = StdRng::seed_from_u64(0);
        let dates = generate_forecast(&mut rng, date!(2024 - 02 - 27))
            .unwrap()
            .into_iter()
            .map(|day| *day.date())
            .collect::<Vec<Date>>();
        assert_eq!(
            vec![
                date!(2024 - 02 - 28),
                date!(2024 - 02 - 29),
                date!(2024 - 03 - 01),
                date!(2024 - 03 - 02),
                date!(2024 - 03 - 03),
            ],
            dates
        );
    }

    #[test]
    fn test_generate_forecast_out_of_range() {
        let mut rng = StdRng::seed_from_u64(0);
        match generate_forecast(&mut rng, Date::MAX) {
            Err(DriverError::InvalidInput(e)) => assert!(e.contains("Cannot compute")),
            e => panic!("Unexpected result {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_get_weather_forecast_uses_clock() {
        let context = TestContext::setup().await;
        context.clock().set(datetime!(2023-12-31 23:59:59 UTC));

        let forecast = context.driver().get_weather_forecast().await.unwrap();
        assert_eq!(5, forecast.len());
        assert_eq!(date!(2024 - 01 - 01), *forecast[0].date());
        assert_eq!(date!(2024 - 01 - 05), *forecast[4].date());

        context.clock().advance(Duration::seconds(1));
        let forecast = context.driver().get_weather_forecast().await.unwrap();
        assert_eq!(date!(2024 - 01 - 02), *forecast[0].date());

        context.close().await;
    }
}
