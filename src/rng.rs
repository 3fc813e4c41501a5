use getrandom::getrandom;
use oorandom::Rand64;
use tracing::warn;

/// Source of uniformly distributed floats in `[0, 1)`.
///
/// Ants only ever need a single uniform draw per step, so tests can replace the
/// generator with a scripted sequence.
pub trait UniformSource {
    fn rand_float(&mut self) -> f64;
}

impl UniformSource for Rand64 {
    fn rand_float(&mut self) -> f64 {
        Rand64::rand_float(self)
    }
}

pub fn rng64(seed: u128) -> Rand64 {
    Rand64::new(seed)
}

/// Draws a full 128 bit seed from two consecutive outputs of `rng`.
pub fn derive_seed(rng: &mut Rand64) -> u128 {
    rng.rand_u64() as u128 + ((rng.rand_u64() as u128) << 64)
}

pub fn os_random_seed() -> u128 {
    let mut buf = [0; 16];
    if let Err(error) = getrandom(&mut buf) {
        warn!(error = %error, "OS randomness unavailable, seeding with zero");
    }
    u128::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = rng64(42);
        let mut b = rng64(42);

        for _ in 0..10 {
            assert_eq!(
                UniformSource::rand_float(&mut a),
                UniformSource::rand_float(&mut b)
            );
        }
    }

    #[test]
    fn rand_float_is_in_unit_interval() {
        let mut rng = rng64(os_random_seed());

        for _ in 0..1000 {
            let value = UniformSource::rand_float(&mut rng);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn os_random_seed_is_not_the_fallback() {
        assert_ne!(os_random_seed(), 0);
        assert_ne!(os_random_seed(), os_random_seed());
    }

    #[test]
    fn derived_seeds_differ() {
        let mut rng = rng64(7);
        assert_ne!(derive_seed(&mut rng), derive_seed(&mut rng));
    }
}
