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

use crate::error::validation_error;
use crate::result::Result;
use std::fmt;

/// Creates an error when a condition is not met.
///
/// The message is formatted only if `condition` is false, and the
/// error's text is exactly the formatted message.  The
/// [`validate!`](crate::validate!) macro saves spelling out
/// `format_args!`.
///
/// # Examples
///
/// ```rust
/// use safecall::validate;
///
/// assert!(validate(true, format_args!("unused")).is_ok());
///
/// let error = validate(false, format_args!("x:{}", "y")).unwrap_err();
/// assert_eq!(error.to_string(), "x:y");
/// ```
pub fn validate(condition: bool, message: fmt::Arguments<'_>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(validation_error(message.to_string()))
    }
}

/// Creates an error when a condition is not met, formatting the
/// message like [`format!`].
///
/// # Examples
///
/// ```rust
/// fn check_port(port: u32) -> safecall::Result<()> {
///     safecall::validate!(port <= 65535, "port {} out of range", port)
/// }
///
/// assert!(check_port(80).is_ok());
/// assert_eq!(
///     check_port(70000).unwrap_err().to_string(),
///     "port 70000 out of range"
/// );
/// ```
#[macro_export]
macro_rules! validate {
    ($condition:expr, $($arg:tt)+) => {
        $crate::validate($condition, ::core::format_args!($($arg)+))
    };
}
