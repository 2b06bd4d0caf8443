//! Offline evaluation numbers shown on the analytics view.
//!
//! Everything here is fixed except the hourly fraud-rate series, which is
//! illustrative and regenerated on every mount.

use crate::models::{ConfusionMatrixDisplay, ModelPerformanceEntry};

pub const LEGITIMATE_COUNT: u64 = 553_574;
pub const FRAUD_COUNT: u64 = 2_145;

pub fn model_performance() -> Vec<ModelPerformanceEntry> {
    vec![
        ModelPerformanceEntry {
            name: "Logistic Regression",
            accuracy: 0.996,
            recall: 0.0,
            precision: 0.0,
            f1: 0.0,
            auc: 0.50,
        },
        ModelPerformanceEntry {
            name: "Random Forest",
            accuracy: 0.997,
            recall: 0.35,
            precision: 0.73,
            f1: 0.47,
            auc: 0.67,
        },
        ModelPerformanceEntry {
            name: "XGBoost",
            accuracy: 0.997,
            recall: 0.33,
            precision: 0.66,
            f1: 0.44,
            auc: 0.66,
        },
    ]
}

pub fn fraud_distribution() -> Vec<(&'static str, f64)> {
    vec![
        ("Legitimate", LEGITIMATE_COUNT as f64),
        ("Fraud", FRAUD_COUNT as f64),
    ]
}

/// Global importance weights, highest first.
pub fn feature_importance() -> Vec<(&'static str, f64)> {
    let mut weights: Vec<(&'static str, f64)> = vec![
        ("Amount", 0.28),
        ("Hour", 0.14),
        ("Distance", 0.24),
        ("Day", 0.07),
        ("Month", 0.08),
        ("Day of Week", 0.06),
        ("City Population", 0.13),
    ];
    weights.sort_by(|a, b| b.1.total_cmp(&a.1));
    weights
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HourlyFraudRate {
    pub hour: u32,
    pub fraud_rate: f64,
}

/// Night hours (0-5) sit on a higher base rate.
pub fn fraud_by_hour<R>(mut random: R) -> Vec<HourlyFraudRate>
where
    R: FnMut() -> f64,
{
    (0..24)
        .map(|hour| {
            let base = if hour <= 5 { 0.1 } else { 0.02 };
            HourlyFraudRate {
                hour,
                fraud_rate: random() * 0.05 + base,
            }
        })
        .collect()
}

/// Uniform sample in `[0, 1)`.
pub fn random_unit() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        rand::random::<f64>()
    }
}

pub fn confusion_matrix() -> ConfusionMatrixDisplay {
    ConfusionMatrixDisplay {
        true_negative: "553,200+",
        false_positive: "~300",
        false_negative: "~1,400",
        true_positive: "~700",
    }
}

pub const KEY_INSIGHTS: [&str; 6] = [
    "The dataset is highly imbalanced with only 0.39% of transactions being fraudulent.",
    "Random Forest performs best with an AUC of 0.67, followed closely by XGBoost at 0.66.",
    "Transaction amount and distance between customer and merchant are the most important features for fraud detection.",
    "Fraud rates are higher during nighttime hours (midnight to 5 AM).",
    "All models achieve high accuracy (>99.6%) but this is misleading due to class imbalance.",
    "Models struggle with recall (identifying all fraudulent transactions), with the best model only catching 35% of fraud.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_table_is_fixed() {
        let models = model_performance();
        let names: Vec<_> = models.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Logistic Regression", "Random Forest", "XGBoost"]);
        assert_eq!(models[1].auc, 0.67);
        assert_eq!(models[2].precision, 0.66);
    }

    #[test]
    fn importance_is_sorted_descending() {
        let weights = feature_importance();
        assert_eq!(weights.first().map(|w| w.0), Some("Amount"));
        assert_eq!(weights.last().map(|w| w.0), Some("Day of Week"));
        assert!(weights.windows(2).all(|pair| pair[0].1 >= pair[1].1));
    }

    #[test]
    fn hourly_series_uses_night_base_rate() {
        let series = fraud_by_hour(|| 0.0);
        assert_eq!(series.len(), 24);
        assert!(series[..6].iter().all(|h| h.fraud_rate == 0.1));
        assert!(series[6..].iter().all(|h| h.fraud_rate == 0.02));

        let max = fraud_by_hour(|| 1.0);
        assert!((max[0].fraud_rate - 0.15).abs() < 1e-12);
        assert!((max[23].fraud_rate - 0.07).abs() < 1e-12);
    }

    #[test]
    fn random_unit_stays_in_range() {
        for _ in 0..256 {
            let value = random_unit();
            assert!((0.0..1.0).contains(&value));
        }
        let series = fraud_by_hour(random_unit);
        assert!(series.iter().all(|h| h.fraud_rate >= 0.02 && h.fraud_rate < 0.15));
    }

    #[test]
    fn fraud_rate_matches_insight() {
        let rate = FRAUD_COUNT as f64 / (FRAUD_COUNT + LEGITIMATE_COUNT) as f64 * 100.0;
        assert_eq!(format!("{rate:.2}"), "0.39");
    }
}
