use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use regression::Sequential;
use regression::arch::activations::ActFn;
use regression::arch::layers::Dense;
use regression::arch::loss::Mse;
use regression::init;
use regression::optimization::{Adam, GradientDescent, Optimizer};

fn column(values: &[f32]) -> Array2<f32> {
    Array2::from_shape_vec((values.len(), 1), values.to_vec()).unwrap()
}

#[test]
fn linear_model_fits_affine_target() {
    let mut model = Sequential::new([Dense::new((2, 1), None)]);
    let mut rng = StdRng::seed_from_u64(3);
    let mut params = init::xavier_params(&model, &mut rng).unwrap();
    let mut grads = vec![0.0; model.size()];
    let mut sgd = GradientDescent::new(0.05);

    // y = 2a - b + 0.5
    let x = Array2::from_shape_vec(
        (4, 2),
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
    )
    .unwrap();
    let y = column(&[0.5, 2.5, -0.5, 1.5]);

    let mut loss = f32::MAX;
    for _ in 0..4000 {
        loss = model
            .backprop(&params, &mut grads, &Mse::new(), x.view(), y.view())
            .unwrap();
        sgd.update_weights(&grads, &mut params);
    }

    assert!(loss < 1e-4, "loss did not converge: {loss}");

    let probe = model
        .infer(&params, Array2::from_shape_vec((1, 2), vec![1.0, 1.0]).unwrap().view())
        .unwrap();
    assert!((probe[[0, 0]] - 1.5).abs() < 0.05);
}

#[test]
fn mlp_with_adam_reduces_loss() {
    let mut model = Sequential::new([
        Dense::new((1, 8), Some(ActFn::relu())),
        Dense::new((8, 1), None),
    ]);
    let mut rng = StdRng::seed_from_u64(13);
    let mut params = init::xavier_params(&model, &mut rng).unwrap();
    let mut grads = vec![0.0; model.size()];
    let mut adam = Adam::new(model.size(), 0.01, 0.9, 0.999, 1e-8);

    let xs: Vec<f32> = (0..16).map(|i| i as f32 / 16.0).collect();
    let ys: Vec<f32> = xs.iter().map(|x| 3.0 * x + 1.0).collect();
    let x = column(&xs);
    let y = column(&ys);

    let first = model
        .backprop(&params, &mut grads, &Mse::new(), x.view(), y.view())
        .unwrap();
    adam.update_weights(&grads, &mut params);

    let mut last = first;
    for _ in 0..1500 {
        last = model
            .backprop(&params, &mut grads, &Mse::new(), x.view(), y.view())
            .unwrap();
        adam.update_weights(&grads, &mut params);
    }

    assert!(last < first / 10.0, "loss barely moved: {first} -> {last}");

    let probe = model
        .infer(&params, column(&[0.5]).view())
        .unwrap();
    assert!(probe[[0, 0]].is_finite());
}
