use thiserror::Error;

/// Errors raised when a value falls outside the 26-letter shift alphabet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftError {
    #[error("character {ch:?} is not a letter of the alphabet")]
    NotALetter { ch: char },

    #[error("shift {shift} is out of range, expected 0..=25")]
    ShiftOutOfRange { shift: u8 },
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ShiftError::NotALetter { ch: '1' }.to_string(),
        "character '1' is not a letter of the alphabet"
    );
    assert_eq!(
        ShiftError::ShiftOutOfRange { shift: 26 }.to_string(),
        "shift 26 is out of range, expected 0..=25"
    );
}
