use rand::Rng;

use crate::matcher::Color;

/// Fixed prominence of each synthetic color, most prominent first.
pub const SYNTHETIC_COLOR_SCORES: [f64; 3] = [0.3, 0.2, 0.1];

/**
    Assigns stand-in dominant colors to a product that has no real image analysis.

    Every call draws fresh, independent channel values from the given random source.
*/
pub fn generate_dominant_colors<R: Rng>(rng: &mut R) -> Vec<Color> {
    SYNTHETIC_COLOR_SCORES
        .iter()
        .map(|&score| Color::new(rng.gen(), rng.gen(), rng.gen(), score))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn generates_three_colors_with_fixed_scores() {
        let mut rng = StdRng::seed_from_u64(11);
        let colors = generate_dominant_colors(&mut rng);
        let scores = colors.iter().map(|c| c.score).collect::<Vec<_>>();
        assert_eq!(scores, SYNTHETIC_COLOR_SCORES);
    }

    #[test]
    fn same_seed_gives_same_colors() {
        let a = generate_dominant_colors(&mut StdRng::seed_from_u64(5));
        let b = generate_dominant_colors(&mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn consecutive_calls_are_independent() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = generate_dominant_colors(&mut rng);
        let b = generate_dominant_colors(&mut rng);
        assert_ne!(a, b);
    }
}
