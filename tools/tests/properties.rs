//! Property-based tests for the shift attack
//!
//! These hold for every input:
//! - shift 0 is the normalized ciphertext
//! - chained single steps equal a direct k-step shift
//! - 26 single steps return to the ciphertext
//! - counts never exceed the text length
//! - the selected candidate has minimal deviation from the target

use proptest::prelude::*;
use tools::{
    analyze::attack::ShiftGenerator,
    encode::latin::{NormalizedText, LETTERS},
    encrypt::shift::{Shift, ShiftEnc},
};

/// Mixed-case text with digits, spaces and punctuation
fn raw_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,.!]{0,64}"
}

fn letters_only() -> impl Strategy<Value = String> {
    "[A-Z]{1,64}"
}

proptest! {
    #[test]
    fn prop_shift_zero_is_identity(raw in raw_text()) {
        let text = NormalizedText::new(&raw);
        let candidates = ShiftGenerator::generate(&text);
        prop_assert_eq!(candidates[0].text(), text.as_str());
    }

    #[test]
    fn prop_chained_matches_direct_shift(raw in raw_text()) {
        let text = NormalizedText::new(&raw);
        let candidates = ShiftGenerator::generate(&text);

        for shift in Shift::all() {
            let mut direct = String::new();
            ShiftEnc::shift_by(text.as_str(), shift, &mut direct);
            prop_assert_eq!(candidates.get(shift).text(), direct.as_str());
        }
    }

    #[test]
    fn prop_cyclic_closure(raw in raw_text()) {
        let text = NormalizedText::new(&raw);
        let candidates = ShiftGenerator::generate(&text);

        let mut wrapped = String::new();
        ShiftEnc::shift_by_one(candidates[LETTERS - 1].text(), &mut wrapped);
        prop_assert_eq!(wrapped.as_str(), candidates[0].text());
    }

    #[test]
    fn prop_counts_bounded_by_length(raw in raw_text()) {
        let text = NormalizedText::new(&raw);
        let all_letters = text.invalid_chars().next().is_none();

        for candidate in &ShiftGenerator::generate(&text) {
            let total = candidate.counts().total();
            let len = candidate.text().chars().count();
            prop_assert!(total <= len);
            prop_assert_eq!(total == len, all_letters);
            prop_assert_eq!(total + candidate.skipped().len(), len);
        }
    }

    #[test]
    fn prop_frequencies_sum_to_counted_share(raw in letters_only()) {
        let text = NormalizedText::new(&raw);

        for candidate in &ShiftGenerator::generate(&text) {
            let expected = candidate.counts().total() as f64 / text.len() as f64;
            prop_assert!((candidate.frequencies().sum() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_best_has_minimal_deviation(raw in raw_text(), target in 0.0f64..0.2) {
        let candidates = ShiftGenerator::generate(&NormalizedText::new(&raw));
        let best = candidates.best(target);

        prop_assert!(usize::from(best.shift().get()) < LETTERS);
        for candidate in &candidates {
            prop_assert!(candidate.deviation(target) >= best.deviation(target));
            if candidate.deviation(target) == best.deviation(target) {
                prop_assert!(candidate.shift() >= best.shift());
            }
        }
        prop_assert_eq!(candidates.ranked(target)[0].shift(), best.shift());
    }

    #[test]
    fn prop_encrypted_letters_decode_under_inverse(raw in letters_only(), key in 0u8..26) {
        let key = Shift::new(key).unwrap();
        let mut ciphertext = String::new();
        ShiftEnc::encrypt(&raw, key, &mut ciphertext);

        let candidates = ShiftGenerator::generate(&NormalizedText::new(&ciphertext));
        prop_assert_eq!(candidates.get(key.inverse()).text(), raw.as_str());
        prop_assert_eq!(candidates.get(key.inverse()).decrypt_key(), key);
    }
}

