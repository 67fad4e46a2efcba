//! Checked arithmetic helpers for pool and metrics calculations.
//!
//! All integer math in the tracker goes through these helpers so an
//! overflow or a zero denominator becomes a typed error instead of a panic
//! or a silently wrong number.

mod checked;
mod sqrt;

pub use checked::{mul_div, CheckedArithmetic};
pub use sqrt::isqrt;
