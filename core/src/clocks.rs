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

//! Sources of the current time.
//!
//! Business logic that depends on "today" receives a `Clock` instead of querying the system
//! directly so that tests can pin the time to a known value.

use time::OffsetDateTime;

/// Provider of the current time.
pub trait Clock {
    /// Returns the current time in the UTC offset.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock backed by the operating system's real time.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Test utilities.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::Mutex;
    use time::Duration;

    /// A clock frozen at a given instant until a test moves it.
    pub struct SettableClock {
        /// The instant that `now_utc` returns.
        now: Mutex<OffsetDateTime>,
    }

    impl SettableClock {
        /// Creates a clock frozen at `now`.
        pub fn new(now: OffsetDateTime) -> Self {
            Self { now: Mutex::new(now) }
        }

        /// Moves the clock to `now`, which may be earlier than the current value.
        pub fn set(&self, now: OffsetDateTime) {
            *self.now.lock().unwrap() = now;
        }

        /// Moves the clock forward by `delta`.
        pub fn advance(&self, delta: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += delta;
        }
    }

    impl Clock for SettableClock {
        fn now_utc(&self) -> OffsetDateTime {
            *self.now.lock().unwrap()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use time::macros::datetime;

        #[test]
        fn test_settableclock_is_frozen() {
            let now = datetime!(2023-12-01 10:15:00.123456789 UTC);
            let clock = SettableClock::new(now);
            assert_eq!(now, clock.now_utc());
            assert_eq!(now, clock.now_utc());
        }

        #[test]
        fn test_settableclock_set_and_advance() {
            let clock = SettableClock::new(datetime!(2023-12-01 23:00:00 UTC));

            clock.advance(Duration::hours(2));
            assert_eq!(datetime!(2023-12-02 01:00:00 UTC), clock.now_utc());

            clock.set(datetime!(2020-02-29 00:00:00 UTC));
            assert_eq!(datetime!(2020-02-29 00:00:00 UTC), clock.now_utc());
        }
    }
}
