use rand::{Rng, RngCore};

/// # Random Source
/// Uniform bytes for the `Cxkk` instruction.
///
/// Any `rand` generator qualifies, so tests can hand the machine a deterministic one while
/// production machines are seeded from OS entropy.
pub trait RandomSource {
    fn next_byte(&mut self) -> u8;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_byte(&mut self) -> u8 {
        self.gen()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = StdRng::seed_from_u64(8);
        let mut b = StdRng::seed_from_u64(8);
        let a: Vec<u8> = (0..32).map(|_| a.next_byte()).collect();
        let b: Vec<u8> = (0..32).map(|_| b.next_byte()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_works_through_a_trait_object() {
        let mut rng = StepRng::new(0xAB, 0);
        let source: &mut dyn RandomSource = &mut rng;
        assert_eq!(source.next_byte(), 0xAB);
        assert_eq!(source.next_byte(), 0xAB);
    }
}
