use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::{debug, error, info};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::api::{ClientError, ClientResult};
use crate::models::PredictionResult;
use crate::state::{PredictionActions, PredictionSignal, PredictionState};
use crate::API_CLIENT;

#[derive(Clone, Copy)]
pub struct PredictionRunnerHandle {
    actions: PredictionActions,
}

impl PredictionRunnerHandle {
    pub fn submit(&self) {
        submit_impl(self.actions);
    }
}

pub fn use_prediction_runner(state: PredictionSignal) -> PredictionRunnerHandle {
    PredictionRunnerHandle {
        actions: PredictionActions::new(state),
    }
}

fn submit_impl(actions: PredictionActions) {
    let Some(features) = actions.begin_submit() else {
        debug!("prediction already in flight, ignoring submit");
        return;
    };

    let request_id = Uuid::new_v4();

    spawn(async move {
        // let the renderer paint the loading state before the request goes out
        TimeoutFuture::new(0).await;

        let Some(client) = API_CLIENT.get().cloned() else {
            error!(%request_id, "prediction client not initialized");
            actions.fail();
            return;
        };

        debug!(%request_id, ?features, "submitting transaction for scoring");

        let outcome = client.predict(&features).await;
        let analyzed_at = OffsetDateTime::now_utc();
        actions.update(|state| settle_prediction(state, request_id, outcome, analyzed_at));
    });
}

/// Moves a loading state to `Ready` on success, back to `Idle` on any error.
fn settle_prediction(
    state: &mut PredictionState,
    request_id: Uuid,
    outcome: ClientResult<PredictionResult>,
    analyzed_at: OffsetDateTime,
) {
    match outcome {
        Ok(result) => {
            info!(
                %request_id,
                risk_score = result.risk_score,
                label = ?result.label,
                explanations = result.explanations.len(),
                "prediction received"
            );
            state.complete(&result, analyzed_at);
        }
        Err(err) => {
            record_prediction_error(request_id, &err);
            state.fail();
        }
    }
}

fn record_prediction_error(request_id: Uuid, err: &ClientError) {
    error!(
        %request_id,
        kind = err.kind(),
        status = ?err.status(),
        "prediction request failed: {err}"
    );
}
