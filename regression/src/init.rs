use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::arch::Sequential;
use crate::{RegressionErr, Result};

/// Builds a fresh flat parameter buffer for `model`: Xavier-uniform weights
/// and zero biases, laid out layer by layer in the order `Sequential` slices
/// the buffer.
pub fn xavier_params<R: Rng>(model: &Sequential, rng: &mut R) -> Result<Vec<f32>> {
    let mut params = Vec::with_capacity(model.size());

    for layer in model.layers() {
        let (fan_in, fan_out) = (layer.input_dim(), layer.output_dim());
        let range = (6. / (fan_in + fan_out) as f32).sqrt();
        let dist = Uniform::new(-range, range).map_err(|_| RegressionErr::InvalidInit {
            what: "xavier weight range",
        })?;

        params.extend((0..fan_in * fan_out).map(|_| dist.sample(rng)));
        params.resize(params.len() + fan_out, 0.0);
    }

    Ok(params)
}
