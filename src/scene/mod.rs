//! Scene model, the scene builder, and structural signatures.

/// Deterministic scene builder.
pub mod builder;
/// Layers, shapes, elements, and scenes.
pub mod model;
/// Structural signatures and cross-build matching.
pub mod signature;
