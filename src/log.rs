//! Logging shims.
//!
//! With the `tracing` feature these are the `tracing` macros. Without it they
//! swallow their arguments, so call sites log unconditionally through
//! `crate::log::debug!` and `crate::log::warn!`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    #[doc(hidden)]
    #[macro_export]
    macro_rules! __figura_debug {
        ($($arg:tt)*) => {};
    }

    #[doc(hidden)]
    #[macro_export]
    macro_rules! __figura_warn {
        ($($arg:tt)*) => {};
    }
}

#[cfg(not(feature = "tracing"))]
pub use crate::{__figura_debug as debug, __figura_warn as warn};
