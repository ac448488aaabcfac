//! Panic capture for engine isolation.
//!
//! The hook records the message, location and a backtrace of a panic into
//! thread-local storage, but only while the panicking thread is inside a
//! capture scope opened with [`capture_panics`]. Panics anywhere else are
//! passed to whatever hook was installed before, so unrelated crashes keep
//! their usual report.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::PanicHookInfo;
use std::sync::Once;

static INSTALL: Once = Once::new();

thread_local! {
    static CAPTURE_DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC: RefCell<Option<CapturedPanic>> = const { RefCell::new(None) };
}

/// What the hook saw of a panic raised inside a capture scope.
#[derive(Debug, Clone)]
pub struct CapturedPanic {
    pub message: String,
    pub location: Option<String>,
    pub backtrace: String,
}

/// Install the capturing hook. Safe to call any number of times.
pub fn install_panic_hook() {
    INSTALL.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if is_capturing() {
                record_panic(info);
            } else {
                previous(info);
            }
        }));
    });
}

/// RAII guard marking the current thread as inside a capture scope.
pub struct CaptureGuard {
    _private: (),
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURE_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Open a capture scope on the current thread.
#[must_use]
pub fn capture_panics() -> CaptureGuard {
    CAPTURE_DEPTH.with(|depth| depth.set(depth.get() + 1));
    LAST_PANIC.with(|last| *last.borrow_mut() = None);
    CaptureGuard { _private: () }
}

/// Take the most recent panic captured on this thread, if any.
pub fn take_captured_panic() -> Option<CapturedPanic> {
    LAST_PANIC.with(|last| last.borrow_mut().take())
}

fn is_capturing() -> bool {
    CAPTURE_DEPTH.with(|depth| depth.get() > 0)
}

fn record_panic(info: &PanicHookInfo<'_>) {
    let captured = CapturedPanic {
        message: payload_message(info.payload()),
        location: info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
        backtrace: Backtrace::force_capture().to_string(),
    };
    LAST_PANIC.with(|last| *last.borrow_mut() = Some(captured));
}

/// Best-effort text of a panic payload.
pub fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
