use std::sync::Arc;

use anyhow::Context;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{PredictionResult, ServiceHealth, TransactionFeatures};

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Clone)]
pub struct FraudApiClient {
    inner: reqwest::Client,
    config: Arc<AppConfig>,
    base_url: String,
}

impl FraudApiClient {
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let base_url = normalize_base_url(&config.api_base_url);

        let client = reqwest::Client::builder()
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            inner: client,
            config: Arc::new(config),
            base_url,
        })
    }

    pub fn config(&self) -> Arc<AppConfig> {
        Arc::clone(&self.config)
    }

    /// Scores one transaction. Single attempt, no timeout.
    pub async fn predict(&self, features: &TransactionFeatures) -> ClientResult<PredictionResult> {
        let builder = self.request(Method::POST, "predict").json(features);
        let result: PredictionResult = self.send(builder).await?;
        validate_prediction(result)
    }

    pub async fn health(&self) -> ClientResult<ServiceHealth> {
        let builder = self.request(Method::GET, "health");
        self.send(builder).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.join_path(path);
        self.inner
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T>(&self, builder: reqwest::RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await.map_err(ClientError::from)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::from)?;
        decode_response(status, &bytes)
    }
}

fn normalize_base_url(input: &str) -> String {
    input.trim_end_matches('/').to_string()
}

pub(crate) fn decode_response<T>(status: StatusCode, bytes: &[u8]) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus {
            status,
            body: bytes.to_vec(),
        });
    }

    if bytes.is_empty() {
        return Err(ClientError::EmptyResponse(status));
    }

    serde_json::from_slice(bytes).map_err(ClientError::from)
}

fn validate_prediction(result: PredictionResult) -> ClientResult<PredictionResult> {
    if !result.risk_score.is_finite() || !(0.0..=1.0).contains(&result.risk_score) {
        return Err(ClientError::InvalidResponse(format!(
            "risk_score {} outside [0, 1]",
            result.risk_score
        )));
    }
    Ok(result)
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("client setup failed: {0}")]
    Setup(#[from] anyhow::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("empty response body: {0}")]
    EmptyResponse(StatusCode),
    #[error("request failed with status {status}: {}", String::from_utf8_lossy(.body))]
    UnexpectedStatus { status: StatusCode, body: Vec<u8> },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(err) => err.status(),
            Self::EmptyResponse(status) => Some(*status),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Setup(_) => "setup",
            Self::Decode(_) | Self::InvalidResponse(_) | Self::EmptyResponse(_) => "malformed",
            Self::UnexpectedStatus { .. } => "status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PredictionLabel;

    #[test]
    fn decodes_successful_prediction() {
        let body = br#"{"risk_score":0.82,"label":"FRAUD","explanations":[{"feature":"amt","shap_value":-0.5}]}"#;
        let result: PredictionResult = decode_response(StatusCode::OK, body).unwrap();
        let result = validate_prediction(result).unwrap();
        assert_eq!(result.label, PredictionLabel::Fraud);
        assert_eq!(result.explanations.len(), 1);
    }

    #[test]
    fn non_success_status_is_a_request_failure() {
        let err = decode_response::<PredictionResult>(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"detail":"boom"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedStatus { .. }));
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.kind(), "status");
    }

    #[test]
    fn validation_error_body_is_not_decoded() {
        let err = decode_response::<PredictionResult>(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"risk_score":0.5,"label":"FRAUD","explanations":[]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedStatus { .. }));
    }

    #[test]
    fn shape_mismatch_is_a_decode_error() {
        let err = decode_response::<PredictionResult>(StatusCode::OK, br#"{"score":"high"}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert_eq!(err.kind(), "malformed");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn empty_body_is_reported() {
        let err = decode_response::<PredictionResult>(StatusCode::OK, b"").unwrap_err();
        assert!(matches!(err, ClientError::EmptyResponse(StatusCode::OK)));
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let result = PredictionResult {
            risk_score: 1.4,
            label: PredictionLabel::Fraud,
            explanations: Vec::new(),
        };
        assert!(matches!(
            validate_prediction(result),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn health_body_decodes() {
        let health: ServiceHealth = decode_response(StatusCode::OK, br#"{"status":"ok"}"#).unwrap();
        assert!(health.is_online());
    }

    #[test]
    fn base_url_is_joined_without_double_slashes() {
        let mut config = AppConfig::default();
        config.api_base_url = "http://127.0.0.1:8000/".into();
        let client = FraudApiClient::new(config).unwrap();
        assert_eq!(client.join_path("/predict"), "http://127.0.0.1:8000/predict");
        assert_eq!(client.config().api_base_url, "http://127.0.0.1:8000/");
    }
}
