use log::{debug, info};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use regression::Sequential;
use regression::arch::activations::ActFn;
use regression::arch::layers::Dense;
use regression::arch::loss::{LossFn, Mse};
use regression::init;
use regression::optimization::{Adam, GradientDescent, Optimizer};

use crate::config::{ModelSpec, OptimizerSpec, PipelineSpec};
use crate::features::{FeatureSet, NormalizedRow, ScalingFactors};
use crate::model::FittedModel;
use crate::split::TrainSplit;
use crate::{PipelineErr, Result};

/// Fits a model to a train/validation split.
///
/// Runs `spec.epochs` full-batch epochs over the training partition. When a
/// validation partition is present its loss is computed after every epoch,
/// logged, and otherwise ignored: there is no early stopping and no
/// checkpoint selection.
///
/// # Errors
/// `PipelineErr::TrainingData` when the training partition is empty.
pub fn fit(
    spec: &PipelineSpec,
    features: &FeatureSet,
    factors: ScalingFactors,
    split: &TrainSplit,
) -> Result<FittedModel> {
    if split.train.is_empty() {
        return Err(PipelineErr::TrainingData);
    }

    let mut model = resolve_model(&spec.model, features.len());
    let mut rng = resolve_rng(spec.seed);
    let mut params = init::xavier_params(&model, &mut rng)?;
    let mut grads = vec![0.0; model.size()];
    let mut optimizer = resolve_optimizer(&spec.optimizer, model.size());
    let loss_fn = Mse::new();

    let (x, y) = to_matrices(&split.train, features.len());
    let holdout =
        (!split.validation.is_empty()).then(|| to_matrices(&split.validation, features.len()));

    let mut train_loss = 0.0;
    for epoch in 0..spec.epochs.get() {
        train_loss = model.backprop(&params, &mut grads, &loss_fn, x.view(), y.view())?;
        optimizer.update_weights(&grads, &mut params);

        match &holdout {
            Some((vx, vy)) => {
                let vy_pred = model.infer(&params, vx.view())?;
                let validation_loss = loss_fn.loss(vy_pred.view(), vy.view());
                debug!(epoch = epoch, train_loss = train_loss, validation_loss = validation_loss; "epoch finished");
            }
            None => debug!(epoch = epoch, train_loss = train_loss; "epoch finished"),
        }
    }

    info!(epochs = spec.epochs.get(), train_loss = train_loss; "model fitted");
    Ok(FittedModel::new(
        model,
        params,
        features.clone(),
        factors,
        spec.rounding,
    ))
}

/// Resolves the architecture spec into a layer stack over `inputs` features.
fn resolve_model(spec: &ModelSpec, inputs: usize) -> Sequential {
    match spec {
        ModelSpec::Linear => Sequential::new([Dense::new((inputs, 1), None)]),
        ModelSpec::Mlp { hidden } => {
            let mut layers = Vec::with_capacity(hidden.len() + 1);
            let mut width = inputs;
            for units in hidden {
                layers.push(Dense::new((width, units.get()), Some(ActFn::relu())));
                width = units.get();
            }
            layers.push(Dense::new((width, 1), None));
            Sequential::new(layers)
        }
    }
}

fn resolve_optimizer(spec: &OptimizerSpec, len: usize) -> Box<dyn Optimizer> {
    match *spec {
        OptimizerSpec::GradientDescent { learning_rate } => {
            Box::new(GradientDescent::new(learning_rate))
        }
        OptimizerSpec::Adam {
            learning_rate,
            beta1,
            beta2,
            epsilon,
        } => Box::new(Adam::new(len, learning_rate, beta1, beta2, epsilon)),
    }
}

fn resolve_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Packs rows into an `(inputs, targets)` matrix pair.
fn to_matrices(rows: &[NormalizedRow], width: usize) -> (Array2<f32>, Array2<f32>) {
    let mut xs = Vec::with_capacity(rows.len() * width);
    let mut ys = Vec::with_capacity(rows.len());
    for row in rows {
        xs.extend_from_slice(&row.features);
        ys.push(row.target);
    }

    let x = Array2::from_shape_vec((rows.len(), width), xs).unwrap();
    let y = Array2::from_shape_vec((rows.len(), 1), ys).unwrap();
    (x, y)
}
