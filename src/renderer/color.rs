//! RGBA colors for draw descriptions

use rand::Rng;

/// Linear RGBA, each channel in 0-1
pub type Color = [f32; 4];

/// Default colors for the built-in object kinds
pub mod colors {
    use super::Color;

    pub const BLUE: Color = [0.0, 0.48, 1.0, 1.0];
    pub const GRAY: Color = [0.56, 0.56, 0.58, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
}

/// Opaque color with uniformly random RGB channels
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    [
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_color_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let c = random_color(&mut rng);
            assert!(c[..3].iter().all(|ch| (0.0..=1.0).contains(ch)));
            assert_eq!(c[3], 1.0);
        }
    }
}
