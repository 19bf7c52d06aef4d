use std::ops::Range;

use ndarray::{Array2, ArrayView2};

use super::layers::Dense;
use super::loss::LossFn;
use crate::{RegressionErr, Result};

/// A stack of dense layers evaluated front to back.
///
/// All parameters live in one flat buffer laid out layer by layer; the
/// model only knows how to slice it. Training state (layer caches) lives in
/// the layers themselves, which is why the training passes take `&mut self`
/// while `infer` does not.
#[derive(Clone)]
pub struct Sequential {
    layers: Vec<Dense>,
}

impl Sequential {
    /// Creates a new `Sequential` from an ordered layer stack.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Dense>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Total number of parameters across all layers.
    pub fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    /// Width the input batch must have, if the model has any layers.
    pub fn input_dim(&self) -> Option<usize> {
        self.layers.first().map(|layer| layer.input_dim())
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    /// Training forward pass over a batch, caching per-layer state.
    pub fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let ranges = self.check_buffer("params", params.len())?;

        let mut out = x.to_owned();
        for (layer, range) in self.layers.iter_mut().zip(ranges) {
            out = layer.forward(&params[range], out.view())?;
        }

        Ok(out)
    }

    /// Inference pass through a shared reference; touches no caches.
    pub fn infer(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let ranges = self.check_buffer("params", params.len())?;

        let mut out = x.to_owned();
        for (layer, range) in self.layers.iter().zip(ranges) {
            out = layer.apply(&params[range], out.view())?;
        }

        Ok(out)
    }

    /// One full-batch backpropagation step.
    ///
    /// Zeroes `grads`, runs forward over the whole batch, seeds the backward
    /// sweep with the loss derivative and accumulates every layer's gradient
    /// into its slice of `grads`. Returns the batch loss.
    pub fn backprop<L>(
        &mut self,
        params: &[f32],
        grads: &mut [f32],
        loss_fn: &L,
        x: ArrayView2<f32>,
        y: ArrayView2<f32>,
    ) -> Result<f32>
    where
        L: LossFn,
    {
        if x.nrows() == 0 {
            return Err(RegressionErr::EmptyBatch);
        }

        let ranges = self.check_buffer("grads", grads.len())?;
        grads.fill(0.0);

        let y_pred = self.forward(params, x)?;
        let loss = loss_fn.loss(y_pred.view(), y);

        let mut d = loss_fn.loss_prime(y_pred.view(), y);
        for (layer, range) in self.layers.iter_mut().zip(ranges).rev() {
            d = layer.backward(&params[range.clone()], &mut grads[range], d)?;
        }

        Ok(loss)
    }

    /// Per-layer slice ranges into a flat buffer of length `got`.
    fn check_buffer(&self, what: &'static str, got: usize) -> Result<Vec<Range<usize>>> {
        let expected = self.size();
        if got != expected {
            return Err(RegressionErr::ShapeMismatch {
                what,
                got,
                expected,
            });
        }

        let mut ranges = Vec::with_capacity(self.layers.len());
        let mut offset = 0;
        for layer in &self.layers {
            ranges.push(offset..offset + layer.size());
            offset += layer.size();
        }

        Ok(ranges)
    }
}
