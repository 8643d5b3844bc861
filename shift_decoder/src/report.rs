//! Human-readable output of a decoding run

use std::io::{self, Write};

use tools::{
    analyze::{
        attack::CandidateSet,
        frequency::{Candidate, IndexOfCoincidence},
    },
    encode::latin::NormalizedText,
    encrypt::shift::Shift,
};

use crate::config::DecoderConfig;

pub const BANNER: &str = "Automatic Caesar (shift) Cipher Decoder\n\
Input is case insensitive but does not count special characters or numbers.\n\
Characters other than letters are kept in place and reported as warnings.\n\
Please enter the ciphertext:";

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{BANNER}")
}

/// One notice per character the frequency analysis will skip.
pub fn notices(out: &mut impl Write, ciphertext: &NormalizedText) -> io::Result<()> {
    for invalid in ciphertext.invalid_chars() {
        writeln!(out, "{invalid}")?;
    }
    Ok(())
}

/// Statistics of every shift, in ascending shift order.
pub fn candidates(
    out: &mut impl Write,
    candidates: &CandidateSet,
    config: &DecoderConfig,
) -> io::Result<()> {
    let precision = config.precision;
    for candidate in candidates {
        writeln!(out)?;
        writeln!(out, "{candidate:.precision$}")?;
        writeln!(
            out,
            "Textbook index of coincidence: [{:.precision$}]",
            candidate.score_with::<IndexOfCoincidence>()
        )?;
        if config.occurrences {
            occurrences(out, candidate)?;
        }
    }
    Ok(())
}

fn occurrences(out: &mut impl Write, candidate: &Candidate) -> io::Result<()> {
    let found: Vec<String> = candidate
        .occurrences()
        .map(|(letter, count)| format!("{letter} ({count})"))
        .collect();
    writeln!(out, "Found letters: {}", found.join(", "))
}

/// The selected shift.
pub fn result(out: &mut impl Write, best: &Candidate, config: &DecoderConfig) -> io::Result<()> {
    let precision = config.precision;
    writeln!(out)?;
    writeln!(
        out,
        "The shift with the best index of coincidence value was found to be:"
    )?;
    writeln!(out, "Text: [{}]", best.text())?;
    writeln!(out, "Shift Number: [{}]", best.shift())?;
    writeln!(
        out,
        "Index of coincidence value: [{:.precision$}]",
        best.score()
    )?;
    writeln!(out, "Encryption key: [{}]", best.decrypt_key())
}

/// The `config.top` shifts ranked right after the selected one.
pub fn alternatives(
    out: &mut impl Write,
    candidates: &CandidateSet,
    config: &DecoderConfig,
) -> io::Result<()> {
    if config.top == 0 {
        return Ok(());
    }
    let precision = config.precision;
    writeln!(out)?;
    writeln!(out, "Runner-up shifts:")?;
    for (place, candidate) in candidates
        .ranked(config.target)
        .into_iter()
        .enumerate()
        .skip(1)
        .take(config.top)
    {
        writeln!(
            out,
            "place {} : shift [{}] text [{}] score [{:.precision$}] deviation [{:.precision$}]",
            place + 1,
            candidate.shift(),
            candidate.text(),
            candidate.score(),
            candidate.deviation(config.target)
        )?;
    }
    Ok(())
}

pub fn encrypted(out: &mut impl Write, key: Shift, ciphertext: &str) -> io::Result<()> {
    writeln!(out, "Key: [{key}]")?;
    writeln!(out, "Ciphertext: [{ciphertext}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tools::analyze::attack::ShiftGenerator;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_result_block() {
        let set = ShiftGenerator::generate(&NormalizedText::new("khoor"));
        let config = DecoderConfig {
            precision: 4,
            ..DecoderConfig::default()
        };
        let shown = render(|out| result(out, set.get(Shift::new(23).unwrap()), &config));
        assert_eq!(
            shown,
            "\nThe shift with the best index of coincidence value was found to be:\n\
             Text: [HELLO]\n\
             Shift Number: [23]\n\
             Index of coincidence value: [0.0686]\n\
             Encryption key: [3]\n"
        );
    }

    #[test]
    fn test_notices_once_per_character() {
        let shown = render(|out| notices(out, &NormalizedText::new("AB1C")));
        assert_eq!(shown.lines().count(), 1);
        assert!(shown.contains("Invalid character is: [1]"));
    }

    #[test]
    fn test_candidates_cover_every_shift() {
        let set = ShiftGenerator::generate(&NormalizedText::new("ABC"));
        let config = DecoderConfig {
            occurrences: true,
            ..DecoderConfig::default()
        };
        let shown = render(|out| candidates(out, &set, &config));
        assert_eq!(shown.matches("Shift Number: [").count(), 26);
        assert!(shown.contains("Shift Number: [25]\nText: [ZAB]"));
        assert!(shown.contains("Found letters: A (1), B (1), C (1)"));
    }

    #[test]
    fn test_alternatives() {
        let set = ShiftGenerator::generate(&NormalizedText::new("KHOOR"));
        let config = DecoderConfig {
            top: 2,
            precision: 4,
            ..DecoderConfig::default()
        };
        let shown = render(|out| alternatives(out, &set, &config));
        assert_eq!(
            shown,
            "\nRunner-up shifts:\n\
             place 2 : shift [20] text [EBIIL] score [0.0644] deviation [0.0006]\n\
             place 3 : shift [23] text [HELLO] score [0.0686] deviation [0.0036]\n"
        );
    }

    #[test]
    fn test_no_alternatives_by_default() {
        let set = ShiftGenerator::generate(&NormalizedText::new("KHOOR"));
        let shown = render(|out| alternatives(out, &set, &DecoderConfig::default()));
        assert!(shown.is_empty());
    }
}
