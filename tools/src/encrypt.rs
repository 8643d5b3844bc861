pub mod shift {
    use std::fmt::Display;

    use crate::{
        encode::latin::{Letter, LETTERS},
        error::ShiftError,
    };

    /// A shift key, the number of forward rotations 0..=25.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Shift(pub(crate) u8);

    impl Shift {
        pub fn new(shift: u8) -> Result<Self, ShiftError> {
            if usize::from(shift) < LETTERS {
                Ok(Self(shift))
            } else {
                Err(ShiftError::ShiftOutOfRange { shift })
            }
        }

        pub fn get(self) -> u8 {
            self.0
        }

        /// The key that undoes this one, (26 - k) mod 26.
        pub fn inverse(self) -> Self {
            Self(((LETTERS as u8) - self.0) % LETTERS as u8)
        }

        /// All 26 keys in ascending order.
        pub fn all() -> impl Iterator<Item = Shift> {
            (0..LETTERS as u8).map(Self)
        }
    }

    impl TryFrom<u8> for Shift {
        type Error = ShiftError;

        fn try_from(value: u8) -> Result<Self, Self::Error> {
            Self::new(value)
        }
    }

    impl Display for Shift {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    /// Basic shift Encryption/Decryption. Characters outside the alphabet pass through unchanged.
    pub struct ShiftEnc {}

    impl ShiftEnc {
        /// Rotates a single character forward by `steps` positions.
        pub fn rotate_char(ch: char, steps: u8) -> char {
            match Letter::try_from(ch) {
                Ok(letter) => letter.advance(steps).into_char(),
                Err(_) => ch,
            }
        }

        /// Advances every letter by exactly one position, wrapping Z -> A.
        pub fn shift_by_one(text: &str, output: &mut String) {
            output.extend(text.chars().map(|ch| Self::rotate_char(ch, 1)))
        }

        /// Advances every letter by `shift` positions in a single pass.
        pub fn shift_by(text: &str, shift: Shift, output: &mut String) {
            output.extend(text.chars().map(|ch| Self::rotate_char(ch, shift.0)))
        }

        pub fn encrypt(text: &str, shift: Shift, output: &mut String) {
            Self::shift_by(text, shift, output)
        }

        pub fn decrypt(text: &str, shift: Shift, output: &mut String) {
            Self::shift_by(text, shift.inverse(), output)
        }
    }

    #[test]
    fn test_shift_range() {
        assert_eq!(Shift::new(25).map(Shift::get), Ok(25));
        assert_eq!(
            Shift::new(26),
            Err(ShiftError::ShiftOutOfRange { shift: 26 })
        );
        assert_eq!(Shift::all().count(), LETTERS);
    }

    #[test]
    fn test_inverse() {
        assert_eq!(Shift(3).inverse(), Shift(23));
        assert_eq!(Shift(0).inverse(), Shift(0));
        assert_eq!(Shift(13).inverse(), Shift(13));
    }

    #[test]
    fn test_shift_by_one() {
        let mut output = String::new();
        ShiftEnc::shift_by_one("XYZABC", &mut output);
        assert_eq!(output, "YZABCD");
    }

    #[test]
    fn test_shift_passes_non_letters() {
        let mut output = String::new();
        ShiftEnc::shift_by("AB1C D!", Shift(2), &mut output);
        assert_eq!(output, "CD1E F!");
    }

    #[test]
    fn test_encrypt_decrypt() {
        let mut encrypted = String::new();
        ShiftEnc::encrypt("HELLO", Shift(3), &mut encrypted);
        assert_eq!(encrypted, "KHOOR");

        let mut decrypted = String::new();
        ShiftEnc::decrypt(&encrypted, Shift(3), &mut decrypted);
        assert_eq!(decrypted, "HELLO");
    }
}
