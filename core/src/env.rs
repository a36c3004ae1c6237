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

//! Utilities to read the configuration of a service from environment variables.
//!
//! Variables are grouped by a common prefix so that the same settings can be read for different
//! purposes.  For example, `MySqlOptions::from_env("DB")` reads `DB_SERVER` and friends while the
//! tests read `MYSQL_TEST_SERVER` and friends.

use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Loads the variables defined in the `path` file into the environment.
///
/// Variables already present in the environment win over the file.  A missing file is not an
/// error so that deployments can rely on the real environment alone.
pub fn load_env_file(path: &Path) -> Result<(), String> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!("Failed to load {}: {}", path.display(), e)),
    }
}

/// Loads the `.env` file from the current directory, if any.  See `load_env_file`.
pub fn load_dotenv() -> Result<(), String> {
    load_env_file(Path::new(".env"))
}

/// Gets the variable `<prefix>_<suffix>` and parses it as a `T`.
///
/// Returns `None` if the variable is not set.  Values that are set but cannot be parsed are
/// reported as errors that name the variable, so that they can be shown as is to the user.
pub fn get_optional_var<T>(prefix: &str, suffix: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let name = format!("{}_{}", prefix, suffix);
    let raw = match env::var(&name) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(format!("Environment variable {} is not valid UTF-8", name));
        }
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| format!("Invalid value '{}' in environment variable {}: {}", raw, name, e))
}
