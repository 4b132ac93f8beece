//! Common utilities for the tategumi layout engine.
//!
//! This crate provides shared infrastructure used by the markup and layout
//! crates:
//! - **Warning System** - deduplicated, colored terminal output for content
//!   the engine drops or values it cannot use
//! - **Layout Trace** - step-by-step tracing behind the `layout-trace` feature

pub mod trace;
pub mod warning;
