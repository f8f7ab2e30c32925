/// 32-bit FNV-1a accumulator over UTF-16 code units.
///
/// All arithmetic wraps at 32 bits so the result is identical on every platform.
#[derive(Clone, Copy, Debug)]
pub struct Fnv1a32(u32);

impl Fnv1a32 {
    pub const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    pub fn new() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub fn write_unit(&mut self, unit: u16) {
        self.0 ^= u32::from(unit);
        self.0 = self.0.wrapping_mul(Self::PRIME);
    }

    pub fn write_str(&mut self, s: &str) {
        for unit in s.encode_utf16() {
            self.write_unit(unit);
        }
    }

    pub fn finish(self) -> u32 {
        self.0
    }
}

impl Default for Fnv1a32 {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a string to a 32-bit seed.
pub fn hash_str(s: &str) -> u32 {
    let mut h = Fnv1a32::new();
    h.write_str(s);
    h.finish()
}

/// Xorshift32 (13/17/5) stream. One instance per generation pass; never rewound.
#[derive(Clone, Debug)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// A zero seed is coerced to 1: the all-zero state is absorbing.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        // Sign-propagating: the high bits fill from bit 31.
        s ^= ((s as i32) >> 17) as u32;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// `floor(draw * n)`, always `< n` for `n > 0`.
    pub fn next_index(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64).floor() as usize).min(n.saturating_sub(1))
    }
}

/// Format a coordinate for markup: at most three decimals, no trailing zeros, never `-0`.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
