/// Character-class counts of an input text.
///
/// Counting runs over UTF-16 code units, so an astral character counts twice toward `length`
/// (and toward `symbols`). Letter classes are ASCII only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextStats {
    pub length: usize,
    pub vowels: usize,
    pub consonants: usize,
    pub digits: usize,
    pub symbols: usize,
}

impl TextStats {
    pub fn analyse(text: &str) -> Self {
        let mut stats = Self::default();
        for unit in text.encode_utf16() {
            stats.length += 1;
            match unit_class(unit) {
                UnitClass::Vowel => stats.vowels += 1,
                UnitClass::Consonant => stats.consonants += 1,
                UnitClass::Digit => stats.digits += 1,
                UnitClass::Symbol => stats.symbols += 1,
                UnitClass::Underscore | UnitClass::Space => {}
            }
        }
        stats
    }

    /// One-line summary shown under the text input.
    pub fn hint(&self) -> String {
        format!(
            "{} characters • {} vowels • {} consonants • {} digits • {} symbols",
            self.length, self.vowels, self.consonants, self.digits, self.symbols
        )
    }
}

enum UnitClass {
    Vowel,
    Consonant,
    Digit,
    Underscore,
    Space,
    Symbol,
}

fn unit_class(unit: u16) -> UnitClass {
    if let Ok(b) = u8::try_from(unit)
        && b.is_ascii()
    {
        return match b {
            b'a' | b'e' | b'i' | b'o' | b'u' | b'A' | b'E' | b'I' | b'O' | b'U' => UnitClass::Vowel,
            _ if b.is_ascii_alphabetic() => UnitClass::Consonant,
            _ if b.is_ascii_digit() => UnitClass::Digit,
            b'_' => UnitClass::Underscore,
            _ if is_space(unit) => UnitClass::Space,
            _ => UnitClass::Symbol,
        };
    }
    if is_space(unit) {
        UnitClass::Space
    } else {
        UnitClass::Symbol
    }
}

// Whitespace as understood by `\s`: Unicode White_Space plus BOM, minus NEL.
fn is_space(unit: u16) -> bool {
    match unit {
        0xfeff => true,
        0x0085 => false,
        _ => char::from_u32(u32::from(unit)).is_some_and(char::is_whitespace),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/seed/text.rs"]
mod tests;
