//! Platform abstraction layer
//!
//! Turns raw browser input into game actions. Kept free of `web-sys` types so
//! the mapping can be tested natively.

pub mod input;

pub use input::{KeyAction, SwipeTracker};
