use crate::{
    foundation::math::{XorShift32, hash_str},
    seed::{
        palette::{Palette, PaletteMode},
        text::TextStats,
    },
};

pub const SYMMETRY_CHOICES: [u32; 3] = [2, 4, 6];

const LAYOUT_LABELS: [&str; 4] = [
    "Radial crest",
    "Orbital emblem",
    "Layered totem",
    "Shield pattern",
];

/// Every knob the scene builder reads. A pure function of `(text, mode)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenerationParams {
    pub seed: u32,
    pub mode: PaletteMode,
    pub stats: TextStats,
    /// `0..=3`; also selects the center polygon side count.
    pub layout_mode: u32,
    /// One of [`SYMMETRY_CHOICES`].
    pub symmetry: u32,
    /// `[1, 8]`, grows by one every 20 characters.
    pub detail_level: f64,
    /// Vowel ratio in `[0, 1]`.
    pub curve_bias: f64,
    /// Digit ratio in `[0, 1]`.
    pub structure_level: f64,
    /// Symbol count capped at 15.
    pub accent_level: u32,
    pub palette: Palette,
}

/// Seed for `(mode, text)`: FNV-1a of `"<mode>|<text>"`.
pub fn seed_for(text: &str, mode: PaletteMode) -> u32 {
    hash_str(&format!("{}|{}", mode.token(), text))
}

impl GenerationParams {
    /// Derive parameters from raw text. The generator draws happen in a fixed order:
    /// layout, symmetry, base hue, then the palette override.
    #[tracing::instrument(skip(text), fields(len = text.len()))]
    pub fn derive(text: &str, mode: PaletteMode) -> Self {
        let stats = TextStats::analyse(text);
        let seed = seed_for(text, mode);
        let mut rng = XorShift32::new(seed);

        let length = stats.length.max(1) as f64;

        let layout_mode = rng.next_index(4) as u32;
        let symmetry = SYMMETRY_CHOICES[rng.next_index(SYMMETRY_CHOICES.len())];
        let detail_level = (1.0 + length / 20.0).min(8.0);
        let curve_bias = stats.vowels as f64 / length;
        let structure_level = stats.digits as f64 / length;
        let accent_level = stats.symbols.min(15) as u32;

        let base_hue = (rng.next_f64() * 360.0).floor();
        let palette = Palette::derive(base_hue, mode, &mut rng);

        Self {
            seed,
            mode,
            stats,
            layout_mode,
            symmetry,
            detail_level,
            curve_bias,
            structure_level,
            accent_level,
            palette,
        }
    }

    pub fn layout_label(&self) -> &'static str {
        LAYOUT_LABELS
            .get(self.layout_mode as usize)
            .copied()
            .unwrap_or("Unknown")
    }

    /// `0x` followed by eight lowercase hex digits.
    pub fn seed_hex(&self) -> String {
        format!("0x{:08x}", self.seed)
    }

    pub fn meta_tags(&self) -> [String; 3] {
        [
            format!("Layout: {}", self.layout_label()),
            format!("Symmetry: {} fold", self.symmetry),
            format!("Detail: {:.1}", self.detail_level),
        ]
    }

    pub fn svg_filename(&self) -> String {
        format!("glyphseed-{:08x}.svg", self.seed)
    }

    pub fn png_filename(&self, size: u32) -> String {
        format!("glyphseed-{:08x}-{size}.png", self.seed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/seed/params.rs"]
mod tests;
