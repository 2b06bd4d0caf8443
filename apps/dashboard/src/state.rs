use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::models::{
    FeatureField, FeatureImportanceEntry, PredictionLabel, PredictionResult, RiskFactor,
    TransactionFeatures,
};

pub type PredictionSignal = Signal<PredictionState>;

/// A result as shown on screen, derived once when the response lands.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionView {
    pub risk_score: f64,
    pub label: PredictionLabel,
    pub feature_importance: Vec<FeatureImportanceEntry>,
    pub analyzed_at: OffsetDateTime,
}

impl PredictionView {
    pub fn from_result(result: &PredictionResult, analyzed_at: OffsetDateTime) -> Self {
        Self {
            risk_score: result.risk_score,
            label: result.label,
            feature_importance: result.feature_importance(),
            analyzed_at,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PredictionPhase {
    #[default]
    Idle,
    Loading,
    Ready(PredictionView),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictionState {
    pub form: TransactionFeatures,
    pub phase: PredictionPhase,
    pub risk_factors: Vec<RiskFactor>,
    pub requests_issued: u64,
}

impl PredictionState {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, PredictionPhase::Loading)
    }

    pub fn prediction(&self) -> Option<&PredictionView> {
        match &self.phase {
            PredictionPhase::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn update_field(&mut self, field: FeatureField, raw: &str) {
        self.form.apply(field, raw);
    }

    /// Enters `Loading` and returns the payload to send, or `None` when a request is
    /// already in flight.
    pub fn begin_submit(&mut self) -> Option<TransactionFeatures> {
        if self.is_loading() {
            return None;
        }
        self.phase = PredictionPhase::Loading;
        self.requests_issued += 1;
        Some(self.form.clone())
    }

    pub fn complete(&mut self, result: &PredictionResult, analyzed_at: OffsetDateTime) {
        self.phase = PredictionPhase::Ready(PredictionView::from_result(result, analyzed_at));
    }

    pub fn fail(&mut self) {
        self.phase = PredictionPhase::Idle;
    }
}

#[derive(Clone, Copy)]
pub struct PredictionActions {
    state: PredictionSignal,
}

impl PredictionActions {
    pub fn new(state: PredictionSignal) -> Self {
        Self { state }
    }

    pub fn update_field(&self, field: FeatureField, raw: &str) {
        let mut state = self.state;
        state.write().update_field(field, raw);
    }

    pub fn begin_submit(&self) -> Option<TransactionFeatures> {
        let mut state = self.state;
        let mut guard = state.write();
        let payload = guard.begin_submit();
        if payload.is_some() {
            tracing::debug!(sequence = guard.requests_issued, "prediction request started");
        }
        payload
    }

    pub fn update(&self, apply: impl FnOnce(&mut PredictionState)) {
        let mut state = self.state;
        let mut guard = state.write();
        apply(&mut *guard);
    }

    pub fn fail(&self) {
        let mut state = self.state;
        state.write().fail();
    }
}

pub fn use_prediction_state() -> PredictionSignal {
    use_signal(PredictionState::default)
}
