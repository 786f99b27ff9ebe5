use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use crate::utils::utils_errors::ScenesmithError;

/// Returns the generator used by all sampling entry points in the toolbox.
/// The same seed always produces the same generated dataset.
pub fn rng_from_seed(seed: u64) -> ChaCha20Rng {
    return ChaCha20Rng::seed_from_u64(seed);
}

pub fn rng_from_entropy() -> ChaCha20Rng {
    return ChaCha20Rng::from_entropy();
}

pub struct SimpleSamplers;
impl SimpleSamplers {
    pub fn uniform_sample<R: Rng>(bounds: (f64, f64), rng: &mut R) -> f64 {
        if bounds.0 == bounds.1 {
            return bounds.0;
        }
        return rng.gen_range(bounds.0..bounds.1);
    }
    pub fn uniform_samples<R: Rng>(bounds: &Vec<(f64, f64)>, rng: &mut R) -> Vec<f64> {
        let mut out_vec = vec![];
        for b in bounds {
            out_vec.push(Self::uniform_sample(*b, rng));
        }
        out_vec
    }
    /// Uniformly drawn index into a collection of the given length.
    pub fn uniform_index<R: Rng>(length: usize, rng: &mut R) -> Result<usize, ScenesmithError> {
        if length == 0 {
            return Err(ScenesmithError::new_generic_error_str("cannot sample an index from an empty collection.", file!(), line!()));
        }
        return Ok(rng.gen_range(0..length));
    }
    pub fn uniform_choice<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Result<&'a T, ScenesmithError> {
        let idx = Self::uniform_index(items.len(), rng)?;
        return Ok(&items[idx]);
    }
}
