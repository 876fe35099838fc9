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

//! Safe execution wrappers.
//!
//! The functions in this crate run a caller-supplied computation and
//! turn a panic raised by it into an ordinary [`Error`], so that the
//! panic does not travel further up the stack.  Errors the
//! computation returns by itself are passed through unchanged.
//! Handler variants hand the error to a callback instead of returning
//! it.  [`validate`] turns a failed precondition into an error.
//!
//! ```rust
//! use safecall::{safe_exec_with_two_results, validate};
//!
//! let (quotient, remainder) = safe_exec_with_two_results(|| {
//!     let (a, b) = (17, 5);
//!     validate!(b != 0, "cannot divide {} by zero", a)?;
//!     Ok((a / b, a % b))
//! })
//! .unwrap();
//! assert_eq!((quotient, remainder), (3, 2));
//! ```
//!
//! How panics are captured and reported is set through [`Config`],
//! which is installed once with [`init`].

mod config;
mod error;
mod expression;
mod fault;
mod keyword;
pub mod logger;
mod plist;
mod result;
mod safe;
mod validate;

pub use crate::config::{init, Config};
pub use crate::error::{Error, ErrorType};
pub use crate::result::Result;
pub use crate::safe::{
    catch, catch_with_handler, safe_exec, safe_exec_with_handler, safe_exec_with_handler0,
    safe_exec_with_handler_with_result, safe_exec_with_handler_with_three_results,
    safe_exec_with_handler_with_two_results, safe_exec_with_no_result, safe_exec_with_result,
    safe_exec_with_three_results, safe_exec_with_two_results,
};
pub use crate::validate::validate;
