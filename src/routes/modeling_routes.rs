use std::sync::Arc;

use axum::{Router, routing::post, extract::{FromRef, State}, Json};

use crate::{
    middleware::bind::Bind,
    models::modeling_models::{TrialsModel, TrialsDicesModel, DEFAULT_DISTRIBUTION_TRIALS},
    services::{histogram::models::HistogramResult, modeling_service::{ModelingService, error::Result}},
};

#[derive(Clone, FromRef)]
pub struct ModelingRoutesState {
    modeling_service: Arc<dyn ModelingService>,
}

pub fn routes(modeling_service: Arc<dyn ModelingService>) -> Router {
    Router::new()
        // Routes
        .route("/onedice", post(roll_one_die))
        .route("/twodice", post(roll_two_dice))
        .route("/normal", post(sample_normal))
        .route("/exponential", post(sample_exponential))
        .route("/advanced", post(sum_dice_sequential))
        .route("/goadvanced", post(sum_dice_concurrent))
        // State
        .with_state(ModelingRoutesState { modeling_service })
}

// Unset fields fall back to each endpoint's defaults. The dice endpoints
// have none, so a request without `trials` is rejected as 0 trials.

async fn roll_one_die(
    State(modeling_service): State<Arc<dyn ModelingService>>,
    Bind(model): Bind<TrialsModel>,
) -> Result<Json<HistogramResult>> {
    let trials = model.trials.unwrap_or(0);
    Ok(Json(modeling_service.roll_one_die(trials).await?))
}

async fn roll_two_dice(
    State(modeling_service): State<Arc<dyn ModelingService>>,
    Bind(model): Bind<TrialsModel>,
) -> Result<Json<HistogramResult>> {
    let trials = model.trials.unwrap_or(0);
    Ok(Json(modeling_service.roll_two_dice(trials).await?))
}

async fn sample_normal(
    State(modeling_service): State<Arc<dyn ModelingService>>,
    Bind(model): Bind<TrialsModel>,
) -> Result<Json<HistogramResult>> {
    let trials = model.trials.unwrap_or(DEFAULT_DISTRIBUTION_TRIALS);
    Ok(Json(modeling_service.sample_normal(trials).await?))
}

async fn sample_exponential(
    State(modeling_service): State<Arc<dyn ModelingService>>,
    Bind(model): Bind<TrialsModel>,
) -> Result<Json<HistogramResult>> {
    let trials = model.trials.unwrap_or(DEFAULT_DISTRIBUTION_TRIALS);
    Ok(Json(modeling_service.sample_exponential(trials).await?))
}

async fn sum_dice_sequential(
    State(modeling_service): State<Arc<dyn ModelingService>>,
    Bind(model): Bind<TrialsDicesModel>,
) -> Result<Json<HistogramResult>> {
    Ok(Json(modeling_service.sum_dice_sequential(model.trials_or_default(), model.dices_or_default()).await?))
}

async fn sum_dice_concurrent(
    State(modeling_service): State<Arc<dyn ModelingService>>,
    Bind(model): Bind<TrialsDicesModel>,
) -> Result<Json<HistogramResult>> {
    Ok(Json(modeling_service.sum_dice_concurrent(model.trials_or_default(), model.dices_or_default()).await?))
}
