pub mod key {
    use rand::Rng;

    use crate::{encode::latin::LETTERS, encrypt::shift::Shift};

    /// Draws a shift key 1..=25 from `rng`. Key 0 would leave the text unchanged.
    pub fn random_shift_from<R: Rng>(rng: &mut R) -> Shift {
        Shift(rng.gen_range(1..LETTERS as u8))
    }

    /// Draws a non-trivial shift key from the thread-local generator.
    pub fn random_shift() -> Shift {
        random_shift_from(&mut rand::thread_rng())
    }

    #[test]
    fn test_random_shift_is_never_zero() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..1000 {
            let shift = random_shift_from(&mut rng);
            assert!((1..LETTERS as u8).contains(&shift.get()));
        }
    }

    #[test]
    fn test_seeded_shift_is_reproducible() {
        use rand::{rngs::StdRng, SeedableRng};

        let first = random_shift_from(&mut StdRng::seed_from_u64(7));
        let second = random_shift_from(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }
}
