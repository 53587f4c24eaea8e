//! The background particle cloud: i.i.d. uniform points in a fixed cube.

use rand::Rng;

pub const STAR_COUNT: usize = 7000;
/// Half-extent of the spawn cube; points land in [-100, 100] per axis.
pub const FIELD_HALF_EXTENT: f32 = 100.0;
/// World-space sprite size of a single star.
pub const STAR_SIZE: f32 = 0.1;

/// Immutable once generated.
#[derive(Debug, Clone)]
pub struct Starfield {
    positions: Vec<[f32; 3]>,
}

impl Starfield {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let positions = (0..STAR_COUNT)
            .map(|_| {
                [
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                ]
            })
            .collect();
        Self { positions }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn exactly_seven_thousand_points_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = Starfield::generate(&mut rng);
        assert_eq!(field.len(), STAR_COUNT);
        for p in field.positions() {
            for c in p {
                assert!((-FIELD_HALF_EXTENT..=FIELD_HALF_EXTENT).contains(c));
            }
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = Starfield::generate(&mut StdRng::seed_from_u64(42));
        let b = Starfield::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a.positions()[0], b.positions()[0]);
        assert_eq!(a.positions()[STAR_COUNT - 1], b.positions()[STAR_COUNT - 1]);
    }
}
