pub mod frequency {
    use std::fmt::Display;

    use crate::{
        encode::latin::{InvalidChar, Letter, LETTERS},
        encrypt::shift::Shift,
    };

    /// Relative frequency of every letter in natural English text, indexed by alphabet position.
    pub const REFERENCE_FREQUENCIES: [f64; LETTERS] = [
        0.082, 0.015, 0.028, 0.043, 0.127, 0.022, 0.020, 0.061, 0.070, 0.002, 0.008, 0.040, 0.024,
        0.067, 0.075, 0.019, 0.001, 0.060, 0.063, 0.097, 0.028, 0.010, 0.023, 0.001, 0.020, 0.001,
    ];

    /// The expected index of coincidence of natural English text.
    pub const TARGET_IOC: f64 = 0.065;

    /// Number of occurrences of each letter in a text.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct LetterCounts([usize; LETTERS]);

    impl LetterCounts {
        /// Counts every letter of `text`. Characters outside the alphabet are skipped
        /// and returned as notices alongside the counts.
        pub fn tally(text: &str) -> (Self, Vec<InvalidChar>) {
            let mut counts = [0; LETTERS];
            let mut skipped = Vec::new();

            for (position, ch) in text.chars().enumerate() {
                match Letter::try_from(ch) {
                    Ok(letter) => counts[letter.position()] += 1,
                    Err(_) => skipped.push(InvalidChar { ch, position }),
                }
            }
            (Self(counts), skipped)
        }

        pub fn get(&self, letter: Letter) -> usize {
            self.0[letter.position()]
        }

        /// Number of counted letters, never more than the length of the text.
        pub fn total(&self) -> usize {
            self.0.iter().sum()
        }

        pub fn as_array(&self) -> &[usize; LETTERS] {
            &self.0
        }

        /// Divides every count by `len`, the length of the original ciphertext.
        /// An empty text has all frequencies 0.
        pub fn frequencies(&self, len: usize) -> LetterFrequencies {
            if len == 0 {
                return LetterFrequencies::default();
            }
            LetterFrequencies(self.0.map(|count| count as f64 / len as f64))
        }
    }

    impl Display for LetterCounts {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "[")?;
            for (i, count) in self.0.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{count}")?;
            }
            write!(f, "]")
        }
    }

    /// Relative frequency of each letter in a text.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct LetterFrequencies([f64; LETTERS]);

    impl LetterFrequencies {
        pub fn get(&self, letter: Letter) -> f64 {
            self.0[letter.position()]
        }

        pub fn as_array(&self) -> &[f64; LETTERS] {
            &self.0
        }

        pub fn sum(&self) -> f64 {
            self.0.iter().sum()
        }
    }

    impl Display for LetterFrequencies {
        /// Honors the formatter precision, `{:.3}` prints three decimals.
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let precision = f.precision().unwrap_or(6);
            write!(f, "[")?;
            for (i, frequency) in self.0.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{frequency:.precision$}")?;
            }
            write!(f, "]")
        }
    }

    /// A trait which allows to score a piece of text by how close its letter distribution is to English.
    pub trait Scorer {
        /// Mathematical function to call if there is a piece of text to be scored.
        fn score_fn(counts: &LetterCounts, frequencies: &LetterFrequencies) -> f64;

        /// Scores an already counted candidate.
        fn score(candidate: &Candidate) -> f64 {
            Self::score_fn(&candidate.counts, &candidate.frequencies)
        }
    }

    /// Weighted sum of the text frequencies against `REFERENCE_FREQUENCIES`.
    /// This is the score the selection compares to `TARGET_IOC`.
    pub struct DotProduct {}

    impl Scorer for DotProduct {
        fn score_fn(_: &LetterCounts, frequencies: &LetterFrequencies) -> f64 {
            frequencies
                .as_array()
                .iter()
                .zip(REFERENCE_FREQUENCIES.iter())
                .map(|(observed, expected)| observed * expected)
                .sum()
        }
    }

    /// Textbook index of coincidence, sum of c(c-1) over N(N-1) with N the number of letters.
    /// Shown for comparison only, it is invariant under shifting.
    pub struct IndexOfCoincidence {}

    impl Scorer for IndexOfCoincidence {
        fn score_fn(counts: &LetterCounts, _: &LetterFrequencies) -> f64 {
            let total = counts.total();
            if total < 2 {
                return 0.0;
            }
            let pairs: usize = counts
                .as_array()
                .iter()
                .map(|&count| count * count.saturating_sub(1))
                .sum();
            pairs as f64 / (total * (total - 1)) as f64
        }
    }

    /// One of the 26 shift-decodings of a ciphertext together with its statistics.
    /// All statistics are derived from `text` once, at construction.
    #[derive(Clone, Debug, PartialEq)]
    pub struct Candidate {
        text: String,
        shift: Shift,
        counts: LetterCounts,
        frequencies: LetterFrequencies,
        score: f64,
        skipped: Vec<InvalidChar>,
    }

    impl Candidate {
        /// Counts and scores `text`. `len` is the length of the original ciphertext and
        /// is shared by every candidate of a run.
        pub fn new(shift: Shift, text: String, len: usize) -> Self {
            let (counts, skipped) = LetterCounts::tally(&text);
            for invalid in &skipped {
                tracing::debug!(
                    shift = shift.get(),
                    ch = %invalid.ch.escape_default(),
                    position = invalid.position,
                    "skipping character outside the alphabet"
                );
            }

            let frequencies = counts.frequencies(len);
            let score = DotProduct::score_fn(&counts, &frequencies);
            tracing::trace!(shift = shift.get(), score, "scored candidate");

            Self {
                text,
                shift,
                counts,
                frequencies,
                score,
                skipped,
            }
        }

        pub fn text(&self) -> &str {
            &self.text
        }

        /// Number of forward rotations applied to the ciphertext.
        pub fn shift(&self) -> Shift {
            self.shift
        }

        /// The key the plaintext was encrypted with, if this candidate is the plaintext.
        pub fn decrypt_key(&self) -> Shift {
            self.shift.inverse()
        }

        pub fn counts(&self) -> &LetterCounts {
            &self.counts
        }

        pub fn frequencies(&self) -> &LetterFrequencies {
            &self.frequencies
        }

        /// Dot-product score against the English reference table.
        pub fn score(&self) -> f64 {
            self.score
        }

        /// Scores the candidate with another `Scorer`.
        pub fn score_with<S: Scorer>(&self) -> f64 {
            S::score(self)
        }

        /// Absolute distance of the score from `target`.
        pub fn deviation(&self, target: f64) -> f64 {
            (self.score - target).abs()
        }

        /// Characters skipped while counting, positioned in `text`.
        pub fn skipped(&self) -> &[InvalidChar] {
            &self.skipped
        }

        /// Letters that occur at least once, with their counts, in alphabet order.
        pub fn occurrences(&self) -> impl Iterator<Item = (Letter, usize)> + '_ {
            Letter::all()
                .map(|letter| (letter, self.counts.get(letter)))
                .filter(|&(_, count)| count > 0)
        }
    }

    impl Display for Candidate {
        /// The formatter precision applies to the score and the frequencies.
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let precision = f.precision().unwrap_or(6);
            writeln!(f, "Shift Number: [{}]", self.shift)?;
            writeln!(f, "Text: [{}]", self.text)?;
            writeln!(f, "Index of coincidence: [{:.precision$}]", self.score)?;
            writeln!(f, "Letter count: {}", self.counts)?;
            write!(f, "Letter frequencies: {:.precision$}", self.frequencies)
        }
    }

    #[test]
    fn test_reference_table_sums_to_one() {
        let sum: f64 = REFERENCE_FREQUENCIES.iter().sum();
        assert!((sum - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_tally_skips_digits() {
        let (counts, skipped) = LetterCounts::tally("AB1C");
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.get(Letter::try_from('A').unwrap()), 1);
        assert_eq!(counts.get(Letter::try_from('C').unwrap()), 1);
        assert_eq!(skipped, vec![InvalidChar { ch: '1', position: 2 }]);
    }

    #[test]
    fn test_frequencies_use_given_length() {
        let (counts, _) = LetterCounts::tally("AB1C");
        let frequencies = counts.frequencies(4);
        assert_eq!(frequencies.get(Letter::try_from('A').unwrap()), 0.25);
        assert_eq!(frequencies.sum(), 0.75);
    }

    #[test]
    fn test_empty_frequencies() {
        let (counts, _) = LetterCounts::tally("");
        assert_eq!(counts.frequencies(0), LetterFrequencies::default());
    }

    #[test]
    fn test_dot_product_score() {
        let candidate = Candidate::new(Shift(23), "HELLO".to_string(), 5);
        let expected = (0.061 + 0.127 + 0.040 + 0.040 + 0.075) / 5.0;
        assert!((candidate.score() - expected).abs() < 1e-12);
        assert_eq!(candidate.decrypt_key(), Shift(3));
    }

    #[test]
    fn test_index_of_coincidence() {
        let candidate = Candidate::new(Shift(0), "AABB".to_string(), 4);
        // 2*1 + 2*1 over 4*3
        assert!((candidate.score_with::<IndexOfCoincidence>() - 4.0 / 12.0).abs() < 1e-12);

        let single = Candidate::new(Shift(0), "A".to_string(), 1);
        assert_eq!(single.score_with::<IndexOfCoincidence>(), 0.0);
    }

    #[test]
    fn test_occurrences() {
        let candidate = Candidate::new(Shift(0), "HELLO".to_string(), 5);
        let found: Vec<(char, usize)> = candidate
            .occurrences()
            .map(|(letter, count)| (letter.into_char(), count))
            .collect();
        assert_eq!(found, vec![('E', 1), ('H', 1), ('L', 2), ('O', 1)]);
    }

    #[test]
    fn test_display_precision() {
        let candidate = Candidate::new(Shift(1), "AB".to_string(), 2);
        let shown = format!("{candidate:.2}");
        assert!(shown.starts_with("Shift Number: [1]\nText: [AB]\n"));
        assert!(shown.contains("Index of coincidence: [0.05]"));
        assert!(shown.contains("Letter frequencies: [0.50, 0.50, 0.00"));
    }
}

pub mod attack {
    use std::ops::Index;

    use crate::{
        encode::latin::{NormalizedText, LETTERS},
        encrypt::shift::{Shift, ShiftEnc},
    };

    use super::frequency::Candidate;

    /// Builds the 26 candidate decodings of a ciphertext.
    pub struct ShiftGenerator {}

    impl ShiftGenerator {
        /// Candidate 0 is the ciphertext itself, candidate k is candidate k-1 advanced by one letter.
        pub fn generate(ciphertext: &NormalizedText) -> CandidateSet {
            let mut texts: [String; LETTERS] = Default::default();
            texts[0] = ciphertext.as_str().to_owned();

            for k in 1..LETTERS {
                let (done, rest) = texts.split_at_mut(k);
                let previous = &done[k - 1];
                rest[0].reserve(previous.len());
                ShiftEnc::shift_by_one(previous, &mut rest[0]);
            }

            let len = ciphertext.len();
            let mut shift = 0;
            CandidateSet(texts.map(|text| {
                let candidate = Candidate::new(Shift(shift), text, len);
                shift += 1;
                candidate
            }))
        }
    }

    /// Exactly one candidate per shift, ordered by ascending shift.
    #[derive(Clone, Debug, PartialEq)]
    pub struct CandidateSet([Candidate; LETTERS]);

    impl CandidateSet {
        /// Picks the candidate whose score is closest to `target`.
        /// Ties keep the smaller shift.
        pub fn best(&self, target: f64) -> &Candidate {
            let mut best = &self.0[0];
            for candidate in &self.0[1..] {
                if candidate.deviation(target) < best.deviation(target) {
                    best = candidate;
                }
            }
            tracing::debug!(
                shift = best.shift().get(),
                deviation = best.deviation(target),
                "selected best shift"
            );
            best
        }

        /// All candidates ordered by closeness to `target`, ties in ascending shift order.
        /// The first entry is always `best(target)`.
        pub fn ranked(&self, target: f64) -> Vec<&Candidate> {
            let mut ranked: Vec<&Candidate> = self.0.iter().collect();
            ranked.sort_by(|a, b| a.deviation(target).total_cmp(&b.deviation(target)));
            ranked
        }

        pub fn get(&self, shift: Shift) -> &Candidate {
            &self.0[usize::from(shift.get())]
        }

        pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
            self.0.iter()
        }

        pub fn len(&self) -> usize {
            self.0.len()
        }

        pub fn is_empty(&self) -> bool {
            false
        }
    }

    impl Index<usize> for CandidateSet {
        type Output = Candidate;

        fn index(&self, index: usize) -> &Self::Output {
            &self.0[index]
        }
    }

    impl<'a> IntoIterator for &'a CandidateSet {
        type Item = &'a Candidate;
        type IntoIter = std::slice::Iter<'a, Candidate>;

        fn into_iter(self) -> Self::IntoIter {
            self.0.iter()
        }
    }

    #[cfg(test)]
    const DICKENS: &str = "ITWASTHEBESTOFTIMESITWASTHEWORSTOFTIMESITWASTHEAGEOFWISDOMITWASTHEAGEOFFOOLISHNESS";

    #[test]
    fn test_generate_chains_shifts() {
        let candidates = ShiftGenerator::generate(&NormalizedText::new("xyz"));
        assert_eq!(candidates.len(), LETTERS);
        assert_eq!(candidates[0].text(), "XYZ");
        assert_eq!(candidates[1].text(), "YZA");
        assert_eq!(candidates[25].text(), "WXY");
        for (k, candidate) in candidates.iter().enumerate() {
            assert_eq!(usize::from(candidate.shift().get()), k);
        }
    }

    #[test]
    fn test_candidates_own_their_statistics() {
        let candidates = ShiftGenerator::generate(&NormalizedText::new("AAB"));
        let a = crate::encode::latin::Letter::try_from('A').unwrap();
        assert_eq!(candidates[0].counts().get(a), 2);
        assert_eq!(candidates[1].counts().get(a), 0);
        assert_ne!(candidates[0].counts(), candidates[1].counts());
    }

    #[test]
    fn test_breaks_long_english_sample() {
        let mut ciphertext = String::new();
        ShiftEnc::encrypt(DICKENS, Shift(3), &mut ciphertext);

        let candidates = ShiftGenerator::generate(&NormalizedText::new(&ciphertext));
        let best = candidates.best(super::frequency::TARGET_IOC);
        assert_eq!(best.shift(), Shift(23));
        assert_eq!(best.decrypt_key(), Shift(3));
        assert_eq!(best.text(), DICKENS);
    }

    #[test]
    fn test_short_sample_is_not_discriminative() {
        // "HELLO" at shift 23 deviates 0.0036, "WTAAD" at shift 12 only 0.0004.
        let candidates = ShiftGenerator::generate(&NormalizedText::new("KHOOR"));
        let best = candidates.best(super::frequency::TARGET_IOC);
        assert_eq!(best.shift(), Shift(12));
        assert_eq!(best.text(), "WTAAD");
        assert_eq!(candidates[23].text(), "HELLO");
    }

    #[test]
    fn test_digits_are_skipped() {
        let candidates = ShiftGenerator::generate(&NormalizedText::new("AB1C"));
        for candidate in &candidates {
            assert_eq!(candidate.counts().total(), 3);
            assert_eq!(candidate.skipped().len(), 1);
            assert_eq!(candidate.skipped()[0].ch, '1');
            assert_eq!(candidate.text().chars().nth(2), Some('1'));
        }
        assert_eq!(candidates.best(super::frequency::TARGET_IOC).text(), "RS1T");
    }

    #[test]
    fn test_empty_input_selects_shift_zero() {
        let candidates = ShiftGenerator::generate(&NormalizedText::new(""));
        for candidate in &candidates {
            assert_eq!(candidate.text(), "");
            assert_eq!(candidate.counts().total(), 0);
            assert_eq!(candidate.score(), 0.0);
        }
        assert_eq!(candidates.best(super::frequency::TARGET_IOC).shift(), Shift(0));
    }

    #[test]
    fn test_ranked_starts_with_best() {
        let candidates = ShiftGenerator::generate(&NormalizedText::new("KHOOR"));
        let ranked = candidates.ranked(super::frequency::TARGET_IOC);
        assert_eq!(ranked.len(), LETTERS);
        assert_eq!(ranked[0].shift(), Shift(12));
        assert_eq!(ranked[1].shift(), Shift(20));
        assert_eq!(ranked[2].shift(), Shift(23));
    }

    #[test]
    fn test_ranked_keeps_shift_order_on_ties() {
        let candidates = ShiftGenerator::generate(&NormalizedText::new(""));
        let ranked = candidates.ranked(super::frequency::TARGET_IOC);
        let shifts: Vec<u8> = ranked.iter().map(|c| c.shift().get()).collect();
        assert_eq!(shifts, (0..LETTERS as u8).collect::<Vec<u8>>());
    }
}
