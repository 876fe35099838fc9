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

//! Safe-call wrappers.
//!
//! Every wrapper runs a computation and converts a panic raised by it
//! into an ordinary error whose text reads
//! `panic occurred: <payload>\nStack trace:\n<trace>`.  Errors that
//! the computation returns by itself are handed back unchanged.
//!
//! [`catch`] and [`catch_with_handler`] work for any result type,
//! tuples included.  The remaining functions are named shorthands for
//! results of zero to three values.
//!
//! In a build with `panic = "abort"` there is no unwinding to
//! intercept, and a panic ends the process before a wrapper sees it.

use crate::error::Error;
use crate::fault::recover;
use crate::result::Result;

/// Runs `f` and returns its result, converting a panic into an error.
///
/// # Examples
///
/// ```rust
/// let value = safecall::catch(|| Ok::<_, safecall::Error>(42)).unwrap();
/// assert_eq!(value, 42);
///
/// let error = safecall::catch::<i32, _>(|| panic!("oops")).unwrap_err();
/// assert!(error.to_string().starts_with("panic occurred: oops"));
/// ```
pub fn catch<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    recover(f)
}

/// Runs `f` and hands an error, returned or converted from a panic,
/// to `handler`.
///
/// Returns the value of `f` on success and `T::default()` when the
/// error went to `handler`.  The error is not returned, so the
/// handler is the only place to learn about it.  `handler` runs at
/// most once and is not protected against panics.
///
/// # Examples
///
/// ```rust
/// let mut seen = None;
/// let value: u32 = safecall::catch_with_handler(
///     || Err("no value".into()),
///     |error| seen = Some(error.to_string()),
/// );
/// assert_eq!(value, 0);
/// assert_eq!(seen.as_deref(), Some("no value"));
/// ```
pub fn catch_with_handler<T, F, H>(f: F, handler: H) -> T
where
    T: Default,
    F: FnOnce() -> Result<T>,
    H: FnOnce(Error),
{
    match recover(f) {
        Ok(value) => value,
        Err(error) => {
            handler(error);
            T::default()
        }
    }
}

/// Runs `f`, which reports failure through its returned error only.
pub fn safe_exec<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    catch(f)
}

/// Runs `f`, which has no result.  The only possible error is a
/// recovered panic.
pub fn safe_exec_with_no_result<F>(f: F) -> Result<()>
where
    F: FnOnce(),
{
    catch(|| {
        f();
        Ok(())
    })
}

/// Runs `f`, which returns one value.
pub fn safe_exec_with_result<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    catch(f)
}

/// Runs `f`, which returns two values.
pub fn safe_exec_with_two_results<T1, T2, F>(f: F) -> Result<(T1, T2)>
where
    F: FnOnce() -> Result<(T1, T2)>,
{
    catch(f)
}

/// Runs `f`, which returns three values.
pub fn safe_exec_with_three_results<T1, T2, T3, F>(f: F) -> Result<(T1, T2, T3)>
where
    F: FnOnce() -> Result<(T1, T2, T3)>,
{
    catch(f)
}

/// Runs `f` and calls `handler` if it fails.
pub fn safe_exec_with_handler<F, H>(f: F, handler: H)
where
    F: FnOnce() -> Result<()>,
    H: FnOnce(Error),
{
    catch_with_handler(f, handler)
}

/// Runs `f`, which has no result, and calls `handler` if it panics.
pub fn safe_exec_with_handler0<F, H>(f: F, handler: H)
where
    F: FnOnce(),
    H: FnOnce(Error),
{
    if let Err(error) = safe_exec_with_no_result(f) {
        handler(error);
    }
}

/// Runs `f`, which returns one value, and calls `handler` if it
/// fails.  Returns `T::default()` on failure.
pub fn safe_exec_with_handler_with_result<T, F, H>(f: F, handler: H) -> T
where
    T: Default,
    F: FnOnce() -> Result<T>,
    H: FnOnce(Error),
{
    catch_with_handler(f, handler)
}

/// Runs `f`, which returns two values, and calls `handler` if it
/// fails.  Returns default values on failure.
pub fn safe_exec_with_handler_with_two_results<T1, T2, F, H>(f: F, handler: H) -> (T1, T2)
where
    T1: Default,
    T2: Default,
    F: FnOnce() -> Result<(T1, T2)>,
    H: FnOnce(Error),
{
    catch_with_handler(f, handler)
}

/// Runs `f`, which returns three values, and calls `handler` if it
/// fails.  Returns default values on failure.
pub fn safe_exec_with_handler_with_three_results<T1, T2, T3, F, H>(
    f: F,
    handler: H,
) -> (T1, T2, T3)
where
    T1: Default,
    T2: Default,
    T3: Default,
    F: FnOnce() -> Result<(T1, T2, T3)>,
    H: FnOnce(Error),
{
    catch_with_handler(f, handler)
}
