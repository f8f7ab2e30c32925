use crate::foundation::math::XorShift32;

/// Hue policy selected in the control panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    /// Keep the hue drawn from the seed.
    #[default]
    Auto,
    Cool,
    Warm,
    Sunset,
    Neon,
}

impl PaletteMode {
    pub const ALL: [PaletteMode; 5] = [
        PaletteMode::Auto,
        PaletteMode::Cool,
        PaletteMode::Warm,
        PaletteMode::Sunset,
        PaletteMode::Neon,
    ];

    /// Lenient parse: anything but an exact lowercase token is `Auto`.
    pub fn parse(token: &str) -> Self {
        match token {
            "cool" => Self::Cool,
            "warm" => Self::Warm,
            "sunset" => Self::Sunset,
            "neon" => Self::Neon,
            _ => Self::Auto,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cool => "cool",
            Self::Warm => "warm",
            Self::Sunset => "sunset",
            Self::Neon => "neon",
        }
    }

    /// Replace `base_hue` when this mode overrides it. Consumes one draw unless `Auto`.
    pub fn resolve_hue(self, base_hue: f64, rng: &mut XorShift32) -> f64 {
        match self {
            Self::Auto => base_hue,
            Self::Cool => 200.0 + rng.next_f64() * 50.0,
            Self::Warm => 10.0 + rng.next_f64() * 60.0,
            Self::Sunset => 280.0 + rng.next_f64() * 50.0,
            Self::Neon => rng.next_f64() * 360.0,
        }
    }
}

impl std::fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for PaletteMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// HSL color: hue in degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s,
            l,
        }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = self.h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [to_u8(r), to_u8(g), to_u8(b)]
    }

    /// `#rrggbb`, the form written into exported markup.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn lerp(self, other: Hsl, t: f64) -> Hsl {
        // Shortest way round the hue circle.
        let mut dh = (other.h - self.h).rem_euclid(360.0);
        if dh > 180.0 {
            dh -= 360.0;
        }
        Hsl::new(
            self.h + dh * t,
            self.s + (other.s - self.s) * t,
            self.l + (other.l - self.l) * t,
        )
    }
}

impl std::fmt::Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hsl({:.1},{}%,{}%)", self.h, self.s, self.l)
    }
}

/// Seven-color palette derived from one base hue.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Hue before the per-role offsets are applied.
    pub base_hue: f64,
    pub background_inner: Hsl,
    pub background_outer: Hsl,
    pub main1: Hsl,
    pub main2: Hsl,
    pub main3: Hsl,
    pub subtle: Hsl,
    pub highlight: Hsl,
}

impl Palette {
    pub fn from_base_hue(base_hue: f64) -> Self {
        let role = |offset: f64, s: f64, l: f64| Hsl::new(base_hue + offset, s, l);
        Self {
            base_hue,
            background_inner: role(210.0, 35.0, 7.0),
            background_outer: role(210.0, 70.0, 3.0),
            main1: role(40.0, 88.0, 60.0),
            main2: role(66.0, 80.0, 61.0),
            main3: role(320.0, 70.0, 55.0),
            subtle: role(155.0, 60.0, 62.0),
            highlight: role(115.0, 80.0, 74.0),
        }
    }

    /// Draws the mode override (if any) from `rng`, then derives every role.
    pub fn derive(base_hue: f64, mode: PaletteMode, rng: &mut XorShift32) -> Self {
        Self::from_base_hue(mode.resolve_hue(base_hue, rng))
    }

    pub fn colors(&self) -> [Hsl; 7] {
        [
            self.background_inner,
            self.background_outer,
            self.main1,
            self.main2,
            self.main3,
            self.subtle,
            self.highlight,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/seed/palette.rs"]
mod tests;
