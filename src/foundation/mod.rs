//! Shared value types, the error taxonomy, and the bit-exact hashing and random primitives.

/// Clock, viewport, and geometry value types.
pub mod core;
/// Error taxonomy.
pub mod error;
/// FNV-1a hashing, xorshift32, and number formatting.
pub mod math;
