use super::*;

#[test]
fn counts_ascii_classes() {
    let s = TextStats::analyse("Hello, World 42!_");
    assert_eq!(s.length, 17);
    assert_eq!(s.vowels, 3);
    assert_eq!(s.consonants, 7);
    assert_eq!(s.digits, 2);
    assert_eq!(s.symbols, 2);
}

#[test]
fn y_is_a_consonant() {
    let s = TextStats::analyse("yY");
    assert_eq!(s.consonants, 2);
    assert_eq!(s.vowels, 0);
}

#[test]
fn non_ascii_letters_are_symbols_and_astral_counts_twice() {
    let s = TextStats::analyse("é😀");
    assert_eq!(s.length, 3);
    assert_eq!(s.symbols, 3);
    assert_eq!(s.vowels, 0);
}

#[test]
fn unicode_whitespace_is_not_a_symbol() {
    let s = TextStats::analyse("a\u{00a0}\u{2003}\u{feff}\t");
    assert_eq!(s.symbols, 0);
    assert_eq!(s.length, 5);
}

#[test]
fn empty_text_is_all_zero() {
    assert_eq!(TextStats::analyse(""), TextStats::default());
}

#[test]
fn hint_lists_every_count() {
    let hint = TextStats::analyse("ab1#").hint();
    assert_eq!(
        hint,
        "4 characters • 1 vowels • 1 consonants • 1 digits • 1 symbols"
    );
}
