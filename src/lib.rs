//! isa-bridge: matrix and array-buffer interop for ISA models.
//!
//! This crate provides the conversion layer between the dense `f32`
//! matrices used by an independent subspace analysis core and dtype-tagged
//! n-dimensional array buffers as produced by embedding hosts and the
//! wider numerics ecosystem.
//!
//! The design favors small, testable modules: `math` holds the owned
//! matrix and its borrowed views, `buffer` models the array-buffer side,
//! and `bridge` performs the two conversions (copy out, view in) with
//! fail-fast validation.
pub mod bridge;
pub mod buffer;
pub mod error;
pub mod math;
