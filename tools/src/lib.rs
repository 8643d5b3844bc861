//! Building blocks for breaking shift (Caesar) ciphers by frequency analysis.
//!
//! `encode` turns raw input into alphabet positions, `encrypt` rotates text,
//! `analyze` scores the 26 rotations against English and picks the best one.

pub mod analyze;
pub mod encode;
pub mod encrypt;
pub mod error;
pub mod random;

pub use error::ShiftError;
