use ndarray::{linalg, prelude::*};

use crate::arch::activations::ActFn;
use crate::{RegressionErr, Result};

/// A fully-connected layer.
///
/// The layer owns no parameters: weights and biases live in a flat buffer
/// shared by the whole model, and each call views its own slice of it. The
/// slice is laid out as `dim.0 * dim.1` row-major weights followed by
/// `dim.1` biases.
#[derive(Clone)]
pub struct Dense {
    dim: (usize, usize),
    act_fn: Option<ActFn>,
    size: usize,

    // Training-pass metadata, consumed by `backward`.
    x: Array2<f32>,
    z: Array2<f32>,
}

impl Dense {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `dim` - Input and output widths.
    /// * `act_fn` - Optional nonlinearity applied after the affine map.
    pub fn new(dim: (usize, usize), act_fn: Option<ActFn>) -> Self {
        Self {
            dim,
            act_fn,
            size: (dim.0 + 1) * dim.1,
            x: Array2::zeros((0, 0)),
            z: Array2::zeros((0, 0)),
        }
    }

    /// The number of parameters this layer reads from the flat buffer.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn input_dim(&self) -> usize {
        self.dim.0
    }

    pub fn output_dim(&self) -> usize {
        self.dim.1
    }

    /// Training forward pass. Caches the input and pre-activation so a
    /// following `backward` call can compute gradients.
    pub fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let z = self.affine(params, x)?;

        self.x = x.to_owned();
        self.z = z;

        let out = match &self.act_fn {
            Some(act_fn) => self.z.mapv(|v| act_fn.f(v)),
            None => self.z.clone(),
        };

        Ok(out)
    }

    /// Inference pass. Identical math to `forward` but touches no caches,
    /// so it works through a shared reference.
    pub fn apply(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let z = self.affine(params, x)?;

        let out = match &self.act_fn {
            Some(act_fn) => z.mapv(|v| act_fn.f(v)),
            None => z,
        };

        Ok(out)
    }

    /// Backward pass for the most recent `forward` call.
    ///
    /// Accumulates the weight and bias gradients into `grad` (callers zero
    /// the buffer once per step) and returns the delta for the previous
    /// layer.
    pub fn backward(
        &mut self,
        params: &[f32],
        grad: &mut [f32],
        mut d: Array2<f32>,
    ) -> Result<Array2<f32>> {
        if let Some(act_fn) = &self.act_fn {
            d.zip_mut_with(&self.z, |d, &z| *d *= act_fn.df(z));
        }

        let (mut dw, mut db) = self.view_grad(grad)?;
        linalg::general_mat_mul(1.0, &self.x.t(), &d, 1.0, &mut dw);
        db += &d.sum_axis(Axis(0));

        let (w, _) = self.view_params(params)?;
        let mut prev = Array2::zeros((d.nrows(), self.dim.0));
        linalg::general_mat_mul(1.0, &d, &w.t(), 0.0, &mut prev);

        Ok(prev)
    }

    fn affine(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        if x.ncols() != self.dim.0 {
            return Err(RegressionErr::ShapeMismatch {
                what: "layer input",
                got: x.ncols(),
                expected: self.dim.0,
            });
        }

        let (w, b) = self.view_params(params)?;

        let mut z = Array2::zeros((x.nrows(), self.dim.1));
        linalg::general_mat_mul(1.0, &x, &w, 0.0, &mut z);
        z += &b;

        Ok(z)
    }

    /// Views the raw parameter slice as this layer's weights and biases.
    fn view_params<'a>(&self, params: &'a [f32]) -> Result<(ArrayView2<'a, f32>, ArrayView1<'a, f32>)> {
        if params.len() != self.size {
            return Err(RegressionErr::ShapeMismatch {
                what: "layer params",
                got: params.len(),
                expected: self.size,
            });
        }

        let w_size = self.size - self.dim.1;
        let weights = ArrayView2::from_shape(self.dim, &params[..w_size]).unwrap();
        let biases = ArrayView1::from_shape(self.dim.1, &params[w_size..]).unwrap();
        Ok((weights, biases))
    }

    /// Views the raw gradient slice as this layer's delta weights and biases.
    fn view_grad<'a>(
        &self,
        grad: &'a mut [f32],
    ) -> Result<(ArrayViewMut2<'a, f32>, ArrayViewMut1<'a, f32>)> {
        if grad.len() != self.size {
            return Err(RegressionErr::ShapeMismatch {
                what: "layer grad",
                got: grad.len(),
                expected: self.size,
            });
        }

        let w_size = self.size - self.dim.1;
        let (dw_raw, db_raw) = grad.split_at_mut(w_size);
        let dw = ArrayViewMut2::from_shape(self.dim, dw_raw).unwrap();
        let db = ArrayViewMut1::from_shape(self.dim.1, db_raw).unwrap();
        Ok((dw, db))
    }
}
