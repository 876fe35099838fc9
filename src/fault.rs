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

//! Panic interception for safe calls.
//!
//! A process-wide panic hook records the stack trace and location of
//! a panic while it is still in flight, but only when the panicking
//! thread is inside a safe call.  Any other panic is forwarded to the
//! hook that was installed before ours.

use crate::config::settings;
use crate::error::{panic_error, Error, ErrorType};
use crate::logger::{LocalLogger, LogLevel};
use crate::result::Result;
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// What the panic hook records about a panic raised inside a safe
/// call.
struct Capture {
    backtrace: String,
    location: Option<String>,
}

thread_local! {
    /// The number of safe calls active on this thread.
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static CAPTURED: RefCell<Option<Capture>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

fn install_hook() {
    // The hook cannot be swapped while this thread unwinds; the trace
    // is then taken at the catch site.
    if std::thread::panicking() {
        return;
    }
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if DEPTH.try_with(Cell::get).unwrap_or(0) == 0 {
                return previous(info);
            }
            let config = settings();
            let capture = Capture {
                backtrace: capture_backtrace(config.capture_backtrace()),
                location: info.location().map(ToString::to_string),
            };
            let _ = CAPTURED.try_with(|captured| {
                if let Ok(mut slot) = captured.try_borrow_mut() {
                    *slot = Some(capture);
                }
            });
            if !config.quiet_hook() {
                previous(info);
            }
        }));
    });
}

fn capture_backtrace(force: bool) -> String {
    if force {
        Backtrace::force_capture().to_string()
    } else {
        Backtrace::capture().to_string()
    }
}

/// Marks the current thread as being inside a safe call for as long
/// as it lives.
struct Scope;

impl Scope {
    fn enter() -> Self {
        install_hook();
        CAPTURED.with(|captured| captured.borrow_mut().take());
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        Scope
    }

    fn take_capture(&self) -> Option<Capture> {
        CAPTURED.with(|captured| captured.borrow_mut().take())
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Runs `f` and turns a panic raised by it into a panic error.
///
/// An error returned by `f` is passed through as it is.  This
/// function never panics because of `f`.
pub(crate) fn recover<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let scope = Scope::enter();
    // Results leave `f` only through its return value, so nothing
    // `f` half-wrote can be observed after a panic.
    let result = panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(fault_error(payload, scope.take_capture())));
    drop(scope);
    result
}

fn fault_error(payload: Box<dyn Any + Send>, capture: Option<Capture>) -> Error {
    let text = payload_text(payload.as_ref());
    release(payload);
    let Capture {
        backtrace,
        location,
    } = capture.unwrap_or_else(|| Capture {
        backtrace: capture_backtrace(settings().capture_backtrace()),
        location: None,
    });
    let config = settings();
    if config.log_faults() {
        LocalLogger::new(config.app_id()).log(
            LogLevel::Error,
            &format!(
                "recovered from panic at {}: {}",
                location.as_deref().unwrap_or("unknown location"),
                text
            ),
        );
    }
    panic_error(text, backtrace, location)
}

/// Returns the textual form of a panic payload.
fn payload_text(payload: &(dyn Any + Send)) -> String {
    macro_rules! display_first {
        ($($ty:ty),+ $(,)?) => {
            $(
                if let Some(value) = payload.downcast_ref::<$ty>() {
                    return value.to_string();
                }
            )+
        };
    }
    display_first!(
        &'static str,
        String,
        Error,
        Box<dyn std::error::Error + Send>,
        ErrorType,
        i8, i16, i32, i64, i128, isize,
        u8, u16, u32, u64, u128, usize,
        f32, f64,
        bool,
        char,
    );
    "unknown panic payload".to_owned()
}

/// Drops a panic payload.  Dropping an arbitrary payload may panic in
/// turn; such a panic is contained here and its own payload leaked.
fn release(payload: Box<dyn Any + Send>) {
    if payload.is::<&'static str>() || payload.is::<String>() {
        return;
    }
    if let Err(nested) = panic::catch_unwind(AssertUnwindSafe(move || drop(payload))) {
        std::mem::forget(nested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downcast(error: Error) -> Box<ErrorType> {
        error.downcast::<ErrorType>().unwrap()
    }

    #[test]
    fn returned_errors_pass_through() {
        let error = recover::<(), _>(|| Err("test error".into())).unwrap_err();
        assert_eq!(error.to_string(), "test error");
        assert!(error.downcast_ref::<ErrorType>().is_none());
    }

    #[test]
    fn str_payloads_are_verbatim() {
        let error = downcast(recover::<(), _>(|| panic!("panic test")).unwrap_err());
        assert!(error.is_panic());
        assert!(error
            .to_string()
            .starts_with("panic occurred: panic test\nStack trace:\n"));
    }

    #[test]
    fn formatted_payloads_are_verbatim() {
        let code = 7;
        let error = recover::<(), _>(|| panic!("code {}", code)).unwrap_err();
        assert!(error.to_string().starts_with("panic occurred: code 7\n"));
    }

    #[test]
    fn error_payloads_use_their_display() {
        let error = recover::<(), _>(|| {
            let payload: Error = "typed failure".into();
            panic::panic_any(payload)
        })
        .unwrap_err();
        assert!(error.to_string().starts_with("panic occurred: typed failure\n"));
    }

    #[test]
    fn scalar_payloads_use_their_display() {
        let error = recover::<(), _>(|| panic::panic_any(42_i32)).unwrap_err();
        assert!(error.to_string().starts_with("panic occurred: 42\n"));
        let error = recover::<(), _>(|| panic::panic_any(true)).unwrap_err();
        assert!(error.to_string().starts_with("panic occurred: true\n"));
        let error = recover::<(), _>(|| panic::panic_any('x')).unwrap_err();
        assert!(error.to_string().starts_with("panic occurred: x\n"));
    }

    #[test]
    fn send_only_error_payloads_use_their_display() {
        let error = recover::<(), _>(|| {
            let payload: Box<dyn std::error::Error + Send> =
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, "send only"));
            panic::panic_any(payload)
        })
        .unwrap_err();
        assert!(error.to_string().starts_with("panic occurred: send only\n"));
    }

    #[test]
    fn stack_trace_names_the_panicking_function() {
        let error = recover::<(), _>(|| panic!("traced")).unwrap_err().to_string();
        let (_, trace) = error.split_once("Stack trace:\n").unwrap();
        assert!(!trace.trim().is_empty());
        assert!(trace.contains("stack_trace_names_the_panicking_function"), "{}", trace);
    }

    #[test]
    fn other_payloads_are_named_unknown() {
        struct Opaque;
        let error = recover::<(), _>(|| panic::panic_any(Opaque)).unwrap_err();
        assert!(error
            .to_string()
            .starts_with("panic occurred: unknown panic payload\n"));
    }

    #[test]
    fn location_points_at_the_panic() {
        let error = downcast(recover::<(), _>(|| panic!("here")).unwrap_err());
        assert!(error.location().unwrap().contains("fault.rs"));
    }

    #[test]
    fn nested_calls_capture_their_own_faults() {
        let outer = recover(|| {
            let inner = recover::<(), _>(|| panic!("inner")).unwrap_err();
            assert!(inner.to_string().contains("panic occurred: inner"));
            Ok(5)
        });
        assert_eq!(outer.unwrap(), 5);
        assert_eq!(DEPTH.with(Cell::get), 0);
    }

    #[test]
    fn depth_is_restored_after_a_panic() {
        let _ = recover::<(), _>(|| panic!("boom"));
        assert_eq!(DEPTH.with(Cell::get), 0);
        assert!(CAPTURED.with(|captured| captured.borrow().is_none()));
    }

    #[test]
    fn payload_drops_that_panic_are_contained() {
        struct Explosive;
        impl Drop for Explosive {
            fn drop(&mut self) {
                panic!("drop");
            }
        }
        let error = recover::<(), _>(|| panic::panic_any(Explosive)).unwrap_err();
        assert!(error.to_string().contains("unknown panic payload"));
    }
}
