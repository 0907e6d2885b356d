//! Failure boundary around lint code.
//!
//! [`contain`] runs a closure under `catch_unwind` and marks the current
//! thread while it does. The hook from [`install_panic_hook`] reports panics
//! raised inside that mark through `tracing` at debug level, since the
//! engine already turns them into `Fatal` results. Panics anywhere else keep
//! the previous hook.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use tracing::debug;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Run `f`, catching any panic it raises.
pub fn contain<R>(f: impl FnOnce() -> R) -> thread::Result<R> {
    DEPTH.with(|d| d.set(d.get() + 1));
    let out = panic::catch_unwind(AssertUnwindSafe(f));
    DEPTH.with(|d| d.set(d.get() - 1));
    out
}

/// Whether the current thread is inside [`contain`].
pub fn is_contained() -> bool {
    DEPTH.with(|d| d.get() > 0)
}

/// Chain a hook that keeps contained panics off stderr unless
/// `CERTLINT_LOG` enables debug output.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if is_contained() {
            debug!(panic = %info, "contained lint panic");
        } else {
            previous(info);
        }
    }));
}

/// Text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "lint panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_is_scoped_to_contain() {
        assert!(!is_contained());
        let inner = contain(|| {
            let nested = contain(is_contained).unwrap();
            nested && is_contained()
        })
        .unwrap();
        assert!(inner);
        assert!(!is_contained());
    }

    #[test]
    fn test_panic_is_caught_and_mark_cleared() {
        install_panic_hook();
        let err = contain(|| -> u8 { panic!("bad extension") }).unwrap_err();
        assert_eq!(panic_message(err.as_ref()), "bad extension");
        assert!(!is_contained());

        let err = contain(|| -> u8 { panic!("{} entries", 3) }).unwrap_err();
        assert_eq!(panic_message(err.as_ref()), "3 entries");
    }

    #[test]
    fn test_non_string_payload() {
        let err = contain(|| std::panic::panic_any(7u32)).unwrap_err();
        assert_eq!(panic_message(err.as_ref()), "lint panicked");
    }
}
