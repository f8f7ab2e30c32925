//! Text to deterministic generation parameters.

/// Palette modes, colors, and palette derivation.
pub mod palette;
/// Generation parameters and their display metadata.
pub mod params;
/// Character-class statistics of the input text.
pub mod text;
