/*
 * Safecall: Recovers from panics and turns them into ordinary errors.
 * Copyright (C) 2022-2023  Hee Shin
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use chrono::Local;
use core::fmt::{self, Display};

/// Represents the log level for logging messages.
///
/// In the order of increasing severity and decreasing verbosity,
/// they are: `Debug`, `Trace`, `Info`, `Warning`, `Error`, `Severe`
/// and `Fatal`.  The crate itself logs loaded configuration at
/// `Info` and recovered panics at `Error`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    /// Represents debug-level log messages used for debugging
    /// purposes.
    Debug,
    /// Represents trace-level log messages used for detailed tracing
    /// and debugging.
    Trace,
    /// Represents informational log messages that provide general
    /// information.
    Info,
    /// Represents log messages indicating a potential issue or
    /// warning.
    Warning,
    /// Represents log messages indicating an error occurred.
    Error,
    /// Represents log messages indicating a severe error or critical
    /// issue.
    Severe,
    /// Represents log messages indicating a fatal error that causes
    /// the application to exit.
    Fatal,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use LogLevel::*;
        match self {
            Debug => write!(f, "Debug"),
            Trace => write!(f, "Trace"),
            Info => write!(f, "Info"),
            Warning => write!(f, "Warning"),
            Error => write!(f, "Error"),
            Severe => write!(f, "Severe"),
            Fatal => write!(f, "Fatal"),
        }
    }
}

/// Logs messages to standard error.
///
/// Every line carries the application identifier and a local
/// timestamp, so that messages from several components sharing one
/// standard error stay easy to scan and to filter with text
/// processing tools.
///
/// # Examples
///
/// ```rust
/// use safecall::logger::{LocalLogger, LogLevel};
///
/// let logger = LocalLogger::new("my_app");
/// logger.log(LogLevel::Info, "Initializing application");
/// logger.log(LogLevel::Info, &format!("Application ID: {}", "my_app"));
/// ```
pub struct LocalLogger {
    app_id: String,
}

impl LocalLogger {
    /// Creates a new instance of `LocalLogger` with the specified
    /// application identifier.
    pub fn new(app_id: &str) -> Self {
        LocalLogger {
            app_id: app_id.to_owned(),
        }
    }

    /// Logs a message with the specified log level.
    pub fn log(&self, level: LogLevel, message: &str) {
        eprintln!("{}", self.line(level, message));
    }

    fn line(&self, level: LogLevel, message: &str) -> String {
        format!("[{}] [{}] {}: {}", self.app_id, Local::now(), level, message)
    }
}
