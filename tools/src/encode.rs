pub mod latin {
    use std::fmt::Display;

    use crate::error::ShiftError;

    /// The ordered alphabet every shift operates on.
    pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    /// Number of letters in `ALPHABET`.
    pub const LETTERS: usize = 26;

    /// A single uppercase Latin letter, stored as its position 0..=25 in `ALPHABET`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Letter(u8);

    impl Letter {
        /// Converts from an alphabet position, returns None for positions >= 26.
        pub fn from_position(position: usize) -> Option<Self> {
            if position < LETTERS {
                Some(Self(position as u8))
            } else {
                None
            }
        }

        /// Position of the letter in `ALPHABET`.
        pub fn position(self) -> usize {
            usize::from(self.0)
        }

        pub fn into_char(self) -> char {
            char::from(b'A' + self.0)
        }

        /// Moves the letter forward by `steps` positions, wrapping Z -> A.
        pub fn advance(self, steps: u8) -> Self {
            Self(((u16::from(self.0) + u16::from(steps)) % LETTERS as u16) as u8)
        }

        /// Iterates over all letters in alphabet order.
        pub fn all() -> impl Iterator<Item = Letter> {
            (0..LETTERS as u8).map(Self)
        }
    }

    impl TryFrom<char> for Letter {
        type Error = ShiftError;

        /// Only uppercase letters are accepted, callers normalize first.
        fn try_from(ch: char) -> Result<Self, Self::Error> {
            match ch {
                'A'..='Z' => Ok(Self(ch as u8 - b'A')),
                _ => Err(ShiftError::NotALetter { ch }),
            }
        }
    }

    impl Display for Letter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.into_char())
        }
    }

    /// Notice for a character that has no position in the alphabet.
    /// It is skipped from counting but never aborts an analysis.
    /// `position` is a char index into the text the notice was raised for.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct InvalidChar {
        pub ch: char,
        pub position: usize,
    }

    impl Display for InvalidChar {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "Alert: Input contains character that is not a letter. Invalid character is: [{}] at position [{}]",
                self.ch.escape_default(),
                self.position
            )
        }
    }

    /// Uppercased ciphertext. Characters outside the alphabet are kept in place,
    /// the analysis skips and reports them.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct NormalizedText {
        text: String,
        len: usize,
        invalid: Vec<InvalidChar>,
    }

    impl NormalizedText {
        /// Uppercases one raw line of input and warns about every character
        /// that will be ignored by the frequency analysis.
        /// Notices carry the position in `raw`, uppercasing may change the length.
        pub fn new(raw: &str) -> Self {
            let mut text = String::with_capacity(raw.len());
            let mut invalid = Vec::new();

            for (position, raw_ch) in raw.chars().enumerate() {
                for ch in raw_ch.to_uppercase() {
                    if Letter::try_from(ch).is_err() {
                        tracing::warn!(
                            ch = %ch.escape_default(),
                            position,
                            "input contains a character that is not a letter"
                        );
                        invalid.push(InvalidChar { ch, position });
                    }
                    text.push(ch);
                }
            }

            let len = text.chars().count();
            Self { text, len, invalid }
        }

        pub fn as_str(&self) -> &str {
            &self.text
        }

        /// Length in characters. This is the denominator of every letter frequency.
        pub fn len(&self) -> usize {
            self.len
        }

        pub fn is_empty(&self) -> bool {
            self.len == 0
        }

        /// All characters without an alphabet position, in input order.
        pub fn invalid_chars(&self) -> impl Iterator<Item = InvalidChar> + '_ {
            self.invalid.iter().copied()
        }
    }

    impl Display for NormalizedText {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.text)
        }
    }

    #[test]
    fn test_letter_positions() {
        assert_eq!(Letter::try_from('A').map(Letter::position), Ok(0));
        assert_eq!(Letter::try_from('Z').map(Letter::position), Ok(25));
        assert_eq!(
            Letter::try_from('a'),
            Err(ShiftError::NotALetter { ch: 'a' })
        );
        assert_eq!(Letter::from_position(26), None);
        assert_eq!(
            Letter::all().map(Letter::into_char).collect::<String>(),
            ALPHABET
        );
    }

    #[test]
    fn test_advance_wraps() {
        let z = Letter::try_from('Z').unwrap();
        assert_eq!(z.advance(1).into_char(), 'A');
        assert_eq!(z.advance(26), z);
        assert_eq!(Letter::try_from('H').unwrap().advance(3).into_char(), 'K');
        assert_eq!(Letter::try_from('X').unwrap().advance(255).into_char(), 'S');
    }

    #[test]
    fn test_normalize() {
        let text = NormalizedText::new("Hello, World");
        assert_eq!(text.as_str(), "HELLO, WORLD");
        assert_eq!(text.len(), 12);

        let invalid: Vec<InvalidChar> = text.invalid_chars().collect();
        assert_eq!(
            invalid,
            vec![
                InvalidChar { ch: ',', position: 5 },
                InvalidChar { ch: ' ', position: 6 }
            ]
        );
    }

    #[test]
    fn test_notice_positions_follow_raw_input() {
        let text = NormalizedText::new("ß1");
        assert_eq!(text.as_str(), "SS1");
        assert_eq!(text.len(), 3);
        assert_eq!(
            text.invalid_chars().collect::<Vec<InvalidChar>>(),
            vec![InvalidChar { ch: '1', position: 1 }]
        );
    }

    #[test]
    fn test_normalize_empty() {
        let text = NormalizedText::new("");
        assert!(text.is_empty());
        assert_eq!(text.invalid_chars().count(), 0);
    }

    #[test]
    fn test_invalid_char_notice_names_char() {
        let notice = InvalidChar { ch: '1', position: 2 };
        assert!(notice.to_string().contains("[1]"));
        assert!(notice.to_string().contains("[2]"));
    }
}
