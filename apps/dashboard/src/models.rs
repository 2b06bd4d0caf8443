use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Feature record posted to the prediction service.
///
/// Field names on the wire follow the model's feature schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionFeatures {
    #[serde(rename = "amt")]
    pub amount: f64,
    pub hour: u32,
    #[serde(rename = "day")]
    pub day_of_month: u32,
    pub month: u32,
    #[serde(rename = "dayofweek")]
    pub day_of_week: u32,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(rename = "city_pop")]
    pub city_population: u64,
}

impl Default for TransactionFeatures {
    fn default() -> Self {
        Self {
            amount: 120.0,
            hour: 14,
            day_of_month: 15,
            month: 6,
            day_of_week: 3,
            distance_km: 25.5,
            city_population: 250_000,
        }
    }
}

/// One editable input on the transaction form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureField {
    Amount,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
    DistanceKm,
    CityPopulation,
}

impl TransactionFeatures {
    /// Applies raw input text to a single field. Values that do not parse leave the
    /// field untouched; range limits belong to the input controls.
    pub fn apply(&mut self, field: FeatureField, raw: &str) -> bool {
        let raw = raw.trim();
        match field {
            FeatureField::Amount => parse_decimal(raw).map(|v| self.amount = v).is_some(),
            FeatureField::DistanceKm => parse_decimal(raw).map(|v| self.distance_km = v).is_some(),
            FeatureField::Hour => parse_integer(raw).map(|v| self.hour = v).is_some(),
            FeatureField::DayOfMonth => parse_integer(raw).map(|v| self.day_of_month = v).is_some(),
            FeatureField::Month => parse_integer(raw).map(|v| self.month = v).is_some(),
            FeatureField::DayOfWeek => parse_integer(raw).map(|v| self.day_of_week = v).is_some(),
            FeatureField::CityPopulation => parse_integer::<u64>(raw)
                .map(|v| self.city_population = v)
                .is_some(),
        }
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

// Range inputs report decimals ("14.0") in some browsers.
fn parse_integer<T: TryFrom<u64>>(raw: &str) -> Option<T> {
    let value = parse_decimal(raw)?;
    if value < 0.0 {
        return None;
    }
    T::try_from(value.trunc() as u64).ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PredictionLabel {
    Fraud,
    Legitimate,
}

impl PredictionLabel {
    pub fn display(self) -> &'static str {
        match self {
            Self::Fraud => "Fraudulent",
            Self::Legitimate => "Legitimate",
        }
    }

    pub fn is_fraud(self) -> bool {
        matches!(self, Self::Fraud)
    }
}

impl<'de> Deserialize<'de> for PredictionLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == "FRAUD" {
            Self::Fraud
        } else {
            Self::Legitimate
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub feature: String,
    pub shap_value: f64,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub risk_score: f64,
    pub label: PredictionLabel,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub explanations: Vec<Explanation>,
}

impl PredictionResult {
    /// SHAP magnitudes in server order.
    pub fn feature_importance(&self) -> Vec<FeatureImportanceEntry> {
        self.explanations
            .iter()
            .map(|explanation| FeatureImportanceEntry {
                name: explanation.feature.clone(),
                value: explanation.shap_value.abs(),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureImportanceEntry {
    pub name: String,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
}

impl ServiceHealth {
    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskImpact {
    Low,
    Medium,
    High,
}

impl RiskImpact {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub impact: RiskImpact,
    pub description: String,
    pub value: f64,
}

/// Presentation bucket derived from a risk score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskBucket {
    Unknown,
    Low,
    Medium,
    High,
}

impl RiskBucket {
    pub const MEDIUM_THRESHOLD: f64 = 0.3;
    pub const HIGH_THRESHOLD: f64 = 0.7;

    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            None => Self::Unknown,
            Some(score) if score.is_nan() => Self::Unknown,
            Some(score) if score < Self::MEDIUM_THRESHOLD => Self::Low,
            Some(score) if score < Self::HIGH_THRESHOLD => Self::Medium,
            Some(_) => Self::High,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Unknown => "#6B7280",
            Self::Low => "#10B981",
            Self::Medium => "#F59E0B",
            Self::High => "#EF4444",
        }
    }

    pub fn background_class(self) -> &'static str {
        match self {
            Self::Unknown => "bg-gray-100",
            Self::Low => "bg-green-50",
            Self::Medium => "bg-yellow-50",
            Self::High => "bg-red-50",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "No Data",
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recommendation {
    Block,
    Review,
    Approve,
}

impl Recommendation {
    pub fn for_prediction(label: PredictionLabel, score: f64) -> Self {
        if label.is_fraud() {
            return Self::Block;
        }
        match RiskBucket::from_score(Some(score)) {
            RiskBucket::Medium | RiskBucket::High => Self::Review,
            RiskBucket::Low | RiskBucket::Unknown => Self::Approve,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Block => {
                "Block transaction and contact cardholder immediately for verification"
            }
            Self::Review => "Process with caution - flag for post-transaction review",
            Self::Approve => "Approve transaction - low risk indicators detected",
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Self::Block => "text-red-600",
            Self::Review => "text-yellow-600",
            Self::Approve => "text-green-600",
        }
    }
}

pub fn risk_percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelPerformanceEntry {
    pub name: &'static str,
    pub accuracy: f64,
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
    pub auc: f64,
}

impl ModelPerformanceEntry {
    pub fn metric(&self, metric: PerformanceMetric) -> f64 {
        match metric {
            PerformanceMetric::Accuracy => self.accuracy,
            PerformanceMetric::Precision => self.precision,
            PerformanceMetric::Recall => self.recall,
            PerformanceMetric::F1 => self.f1,
            PerformanceMetric::Auc => self.auc,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PerformanceMetric {
    Accuracy,
    Precision,
    Recall,
    F1,
    #[default]
    Auc,
}

impl PerformanceMetric {
    pub const ALL: [PerformanceMetric; 5] = [
        Self::Accuracy,
        Self::Precision,
        Self::Recall,
        Self::F1,
        Self::Auc,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Accuracy => "accuracy",
            Self::Precision => "precision",
            Self::Recall => "recall",
            Self::F1 => "f1",
            Self::Auc => "auc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Accuracy => "Accuracy",
            Self::Precision => "Precision",
            Self::Recall => "Recall",
            Self::F1 => "F1 Score",
            Self::Auc => "AUC ROC",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|metric| metric.key() == value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfusionMatrixDisplay {
    pub true_negative: &'static str,
    pub false_positive: &'static str,
    pub false_negative: &'static str,
    pub true_positive: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn features_serialize_with_service_keys() {
        let value = serde_json::to_value(TransactionFeatures::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "amt": 120.0,
                "hour": 14,
                "day": 15,
                "month": 6,
                "dayofweek": 3,
                "distance": 25.5,
                "city_pop": 250000
            })
        );
    }

    #[test]
    fn apply_updates_only_the_named_field() {
        let mut features = TransactionFeatures::default();
        assert!(features.apply(FeatureField::Hour, "3"));
        assert!(features.apply(FeatureField::DistanceKm, "140"));
        assert!(features.apply(FeatureField::CityPopulation, "1000000"));
        assert_eq!(features.hour, 3);
        assert_eq!(features.distance_km, 140.0);
        assert_eq!(features.city_population, 1_000_000);
        assert_eq!(features.amount, 120.0);
    }

    #[test]
    fn apply_keeps_value_on_garbage_input() {
        let mut features = TransactionFeatures::default();
        assert!(!features.apply(FeatureField::Amount, "abc"));
        assert!(!features.apply(FeatureField::Month, "-2"));
        assert_eq!(features, TransactionFeatures::default());
    }

    #[test]
    fn apply_does_not_clamp_out_of_range_values() {
        let mut features = TransactionFeatures::default();
        assert!(features.apply(FeatureField::Hour, "40"));
        assert!(features.apply(FeatureField::DayOfMonth, "14.0"));
        assert_eq!(features.hour, 40);
        assert_eq!(features.day_of_month, 14);
    }

    #[test]
    fn any_label_other_than_fraud_is_legitimate() {
        let fraud: PredictionLabel = serde_json::from_value(json!("FRAUD")).unwrap();
        let legit: PredictionLabel = serde_json::from_value(json!("LEGIT")).unwrap();
        let lower: PredictionLabel = serde_json::from_value(json!("fraud")).unwrap();
        assert_eq!(fraud, PredictionLabel::Fraud);
        assert_eq!(legit, PredictionLabel::Legitimate);
        assert_eq!(lower, PredictionLabel::Legitimate);
    }

    #[test]
    fn fraud_response_maps_to_display_values() {
        let result: PredictionResult = serde_json::from_value(json!({
            "risk_score": 0.82,
            "label": "FRAUD",
            "explanations": [{ "feature": "amt", "shap_value": -0.5 }]
        }))
        .unwrap();

        assert_eq!(result.label.display(), "Fraudulent");
        assert_eq!(risk_percent(result.risk_score), "82%");
        assert_eq!(
            result.feature_importance(),
            vec![FeatureImportanceEntry {
                name: "amt".into(),
                value: 0.5
            }]
        );
    }

    #[test]
    fn importance_preserves_server_order() {
        let result = PredictionResult {
            risk_score: 0.1,
            label: PredictionLabel::Legitimate,
            explanations: vec![
                Explanation { feature: "hour".into(), shap_value: 0.01 },
                Explanation { feature: "amt".into(), shap_value: -0.9 },
            ],
        };
        let names: Vec<_> = result
            .feature_importance()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["hour", "amt"]);
    }

    #[test]
    fn null_or_missing_explanations_decode_as_empty() {
        let missing: PredictionResult =
            serde_json::from_value(json!({ "risk_score": 0.2, "label": "LEGIT" })).unwrap();
        let null: PredictionResult = serde_json::from_value(
            json!({ "risk_score": 0.2, "label": "LEGIT", "explanations": null }),
        )
        .unwrap();
        assert!(missing.explanations.is_empty());
        assert!(null.explanations.is_empty());
    }

    #[test]
    fn buckets_put_boundaries_in_upper_bucket() {
        assert_eq!(RiskBucket::from_score(None), RiskBucket::Unknown);
        assert_eq!(RiskBucket::from_score(Some(0.0)), RiskBucket::Low);
        assert_eq!(RiskBucket::from_score(Some(0.299)), RiskBucket::Low);
        assert_eq!(RiskBucket::from_score(Some(0.3)), RiskBucket::Medium);
        assert_eq!(RiskBucket::from_score(Some(0.699)), RiskBucket::Medium);
        assert_eq!(RiskBucket::from_score(Some(0.7)), RiskBucket::High);
        assert_eq!(RiskBucket::from_score(Some(1.0)), RiskBucket::High);
    }

    #[test]
    fn bucket_presentation() {
        assert_eq!(RiskBucket::Unknown.label(), "No Data");
        assert_eq!(RiskBucket::Low.color(), "#10B981");
        assert_eq!(RiskBucket::Medium.background_class(), "bg-yellow-50");
        assert_eq!(RiskBucket::High.label(), "High Risk");
    }

    #[test]
    fn recommendation_follows_label_then_bucket() {
        use PredictionLabel::*;
        assert_eq!(Recommendation::for_prediction(Fraud, 0.1), Recommendation::Block);
        assert_eq!(Recommendation::for_prediction(Legitimate, 0.1), Recommendation::Approve);
        assert_eq!(Recommendation::for_prediction(Legitimate, 0.3), Recommendation::Review);
        assert_eq!(Recommendation::for_prediction(Legitimate, 0.69), Recommendation::Review);
        assert_eq!(Recommendation::for_prediction(Legitimate, 0.95), Recommendation::Review);
    }

    #[test]
    fn metric_keys_round_trip_through_selector_values() {
        for metric in PerformanceMetric::ALL {
            assert_eq!(PerformanceMetric::parse(metric.key()), Some(metric));
        }
        assert_eq!(PerformanceMetric::parse("loss"), None);
        assert_eq!(PerformanceMetric::default(), PerformanceMetric::Auc);
    }

    #[test]
    fn health_status() {
        assert!(ServiceHealth { status: "ok".into() }.is_online());
        assert!(!ServiceHealth { status: "degraded".into() }.is_online());
    }
}
