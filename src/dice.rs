use rand::Rng;

pub const DIE_SIDES: u32 = 6;

pub fn single<R: Rng + ?Sized>(rng: &mut R, sides: u32) -> u32 {
    rng.gen_range(1..=sides)
}

pub fn roll<R: Rng + ?Sized>(rng: &mut R, sides: u32, count: u32) -> u32 {
    (0..count).map(|_| single(rng, sides)).sum()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_single_stays_on_die_faces() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let face = single(&mut rng, DIE_SIDES);
            assert!((1..=DIE_SIDES).contains(&face));
        }
    }

    #[test]
    fn test_roll_sums_count_faces() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let sum = roll(&mut rng, DIE_SIDES, 2);
            assert!((2..=12).contains(&sum));
        }
        assert_eq!(roll(&mut rng, DIE_SIDES, 0), 0);
    }
}
