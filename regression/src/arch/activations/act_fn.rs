use super::{Relu, Sigmoid};

/// Pointwise nonlinearity a dense layer applies after its affine map.
#[derive(Clone, Copy)]
pub enum ActFn {
    Relu(Relu),
    Sigmoid(Sigmoid),
}

impl ActFn {
    pub fn relu() -> Self {
        ActFn::Relu(Relu::new())
    }

    pub fn sigmoid() -> Self {
        ActFn::Sigmoid(Sigmoid::new())
    }

    pub fn f(&self, z: f32) -> f32 {
        match self {
            ActFn::Relu(a) => a.f(z),
            ActFn::Sigmoid(a) => a.f(z),
        }
    }

    pub fn df(&self, z: f32) -> f32 {
        match self {
            ActFn::Relu(a) => a.df(z),
            ActFn::Sigmoid(a) => a.df(z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_clamps_negatives() {
        let act = ActFn::relu();

        assert_eq!(act.f(-3.0), 0.0);
        assert_eq!(act.f(2.5), 2.5);
        assert_eq!(act.df(-3.0), 0.0);
        assert_eq!(act.df(2.5), 1.0);
    }

    #[test]
    fn sigmoid_midpoint() {
        let act = ActFn::sigmoid();

        assert!((act.f(0.0) - 0.5).abs() < 1e-6);
        assert!((act.df(0.0) - 0.25).abs() < 1e-6);
    }
}
