//! Layout tracing.
//!
//! With the `layout-trace` feature enabled, [`layout_trace!`](crate::layout_trace)
//! prints one dimmed line to stderr. Without it the branch is statically dead,
//! so call sites never need their own `cfg` guards and never format anything.

use owo_colors::OwoColorize;

/// Returns `true` when tracing is compiled in.
#[must_use]
pub const fn enabled() -> bool {
    cfg!(feature = "layout-trace")
}

/// Print one trace line. Prefer the [`layout_trace!`](crate::layout_trace) macro.
pub fn emit(component: &str, message: &str) {
    eprintln!("{}", format!("[{component}] {message}").dimmed());
}

/// Trace a layout step when the `layout-trace` feature is enabled.
///
/// ```ignore
/// layout_trace!("Block", "push cache {} (count {})", name, count);
/// ```
#[macro_export]
macro_rules! layout_trace {
    ($component:expr, $($arg:tt)*) => {
        if $crate::trace::enabled() {
            $crate::trace::emit($component, &format!($($arg)*));
        }
    };
}
