use dioxus::prelude::*;

use crate::charts::{Axis, BarChartSpec, DataPoint, PieChartSpec, Series};
use crate::fixtures::sample::{
    confusion_matrix, feature_importance, fraud_by_hour, fraud_distribution, model_performance,
    random_unit, HourlyFraudRate, FRAUD_COUNT, KEY_INSIGHTS, LEGITIMATE_COUNT,
};
use crate::models::{ModelPerformanceEntry, PerformanceMetric};
use crate::ui::chart::{BarChart, PieChart};
use crate::ui::format::format_count;

const DISTRIBUTION_COLORS: [&str; 2] = ["#0088FE", "#FF8042"];

#[component]
pub fn AnalyticsPanel() -> Element {
    let mut selected_metric = use_signal(PerformanceMetric::default);
    // regenerated on every mount
    let hourly = use_hook(|| fraud_by_hour(random_unit));

    let metric = *selected_metric.read();
    let models = model_performance();
    let comparison = model_comparison_chart(&models, metric);
    let summary = DistributionSummary::from_counts(LEGITIMATE_COUNT, FRAUD_COUNT);
    let matrix = confusion_matrix();

    let distribution = PieChartSpec::builder(
        fraud_distribution()
            .into_iter()
            .map(|(name, count)| DataPoint::new(name, count))
            .collect(),
    )
    .colors(DISTRIBUTION_COLORS)
    .legend()
    .build();

    let importance = BarChartSpec::builder(Series::new(
        "Importance",
        "#82ca9d",
        feature_importance()
            .into_iter()
            .map(|(name, weight)| DataPoint::new(name, weight))
            .collect(),
    ))
    .horizontal()
    .value_axis(Axis::numeric(0.0, 0.3).with_ticks(3))
    .category_width(100.0)
    .legend()
    .build();

    let hourly_chart = hourly_chart(&hourly);

    rsx! {
        section { class: "p-6 bg-gray-50 min-h-screen",
            h1 { class: "text-3xl font-bold text-center mb-8", "Credit Card Fraud Detection Dashboard" }

            div { class: "grid grid-cols-1 lg:grid-cols-2 gap-6 mb-6",
                div { class: "bg-white p-4 rounded-lg shadow",
                    h2 { class: "text-xl font-semibold mb-4", "Transaction Distribution" }
                    div { class: "flex items-center",
                        div { class: "h-64 w-full", PieChart { spec: distribution } }
                        div { class: "ml-4 text-gray-700",
                            p { class: "mb-2",
                                span { class: "font-semibold", "Total Transactions: " }
                                "{summary.total}"
                            }
                            p { class: "mb-2",
                                span { class: "font-semibold", "Legitimate: " }
                                "{summary.legitimate}"
                            }
                            p { class: "mb-2",
                                span { class: "font-semibold", "Fraud: " }
                                "{summary.fraud}"
                            }
                            p { class: "mb-2 text-red-600 font-semibold", "Fraud Rate: {summary.fraud_rate}" }
                        }
                    }
                }

                div { class: "bg-white p-4 rounded-lg shadow",
                    h2 { class: "text-xl font-semibold mb-4", "Model Performance Comparison" }
                    div { class: "flex justify-end mb-2",
                        select {
                            class: "border rounded p-1 text-sm",
                            onchange: move |evt| {
                                if let Some(next) = PerformanceMetric::parse(evt.value().as_str()) {
                                    selected_metric.set(next);
                                }
                            },
                            for choice in PerformanceMetric::ALL {
                                option {
                                    value: choice.key(),
                                    selected: choice == metric,
                                    {choice.label()}
                                }
                            }
                        }
                    }
                    div { class: "h-64", BarChart { spec: comparison } }
                }
            }

            div { class: "grid grid-cols-1 lg:grid-cols-2 gap-6 mb-6",
                div { class: "bg-white p-4 rounded-lg shadow",
                    h2 { class: "text-xl font-semibold mb-4", "Feature Importance" }
                    div { class: "h-64", BarChart { spec: importance } }
                }
                div { class: "bg-white p-4 rounded-lg shadow",
                    h2 { class: "text-xl font-semibold mb-4", "Fraud by Hour of Day" }
                    div { class: "h-64", BarChart { spec: hourly_chart } }
                }
            }

            div { class: "bg-white p-4 rounded-lg shadow mb-6",
                h2 { class: "text-xl font-semibold mb-4", "Confusion Matrix Visualization" }
                div { class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                    for model in models.iter() {
                        div { key: "{model.name}", class: "border p-4 rounded",
                            h3 { class: "text-lg font-medium mb-2", "{model.name}" }
                            div { class: "grid grid-cols-2 gap-2 text-center",
                                div { class: "bg-green-100 p-2 rounded",
                                    div { class: "font-bold", "True Negative" }
                                    div { class: "text-2xl", "{matrix.true_negative}" }
                                }
                                div { class: "bg-red-100 p-2 rounded",
                                    div { class: "font-bold", "False Positive" }
                                    div { class: "text-2xl", "{matrix.false_positive}" }
                                }
                                div { class: "bg-red-100 p-2 rounded",
                                    div { class: "font-bold", "False Negative" }
                                    div { class: "text-2xl", "{matrix.false_negative}" }
                                }
                                div { class: "bg-green-100 p-2 rounded",
                                    div { class: "font-bold", "True Positive" }
                                    div { class: "text-2xl", "{matrix.true_positive}" }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "bg-white p-4 rounded-lg shadow",
                h2 { class: "text-xl font-semibold mb-4", "Key Insights" }
                ul { class: "list-disc pl-6 space-y-2",
                    for insight in KEY_INSIGHTS.iter() {
                        li { "{insight}" }
                    }
                }
            }
        }
    }
}

/// Bars for one metric column of the model table.
fn model_comparison_chart(
    models: &[ModelPerformanceEntry],
    metric: PerformanceMetric,
) -> BarChartSpec {
    let points = models
        .iter()
        .map(|model| DataPoint::new(model.name, model.metric(metric)))
        .collect();
    BarChartSpec::builder(Series::new(
        metric.key().to_uppercase(),
        "#8884d8",
        points,
    ))
    .value_axis(Axis::numeric(0.0, 1.0).with_ticks(4))
    .legend()
    .build()
}

fn hourly_chart(series: &[HourlyFraudRate]) -> BarChartSpec {
    let points = series
        .iter()
        .map(|entry| DataPoint::new(entry.hour.to_string(), entry.fraud_rate))
        .collect();
    BarChartSpec::builder(Series::new("Fraud Rate", "#ff7300", points))
        .value_axis(Axis::auto().with_ticks(4))
        .legend()
        .build()
}

#[derive(Clone, Debug, PartialEq)]
struct DistributionSummary {
    total: String,
    legitimate: String,
    fraud: String,
    fraud_rate: String,
}

impl DistributionSummary {
    fn from_counts(legitimate: u64, fraud: u64) -> Self {
        let total = legitimate + fraud;
        let rate = if total == 0 {
            0.0
        } else {
            fraud as f64 / total as f64 * 100.0
        };
        Self {
            total: format_count(total),
            legitimate: format_count(legitimate),
            fraud: format_count(fraud),
            fraud_rate: format!("{rate:.4}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_metric_uses_only_that_column() {
        let models = model_performance();

        let auc = model_comparison_chart(&models, PerformanceMetric::Auc);
        let auc_values: Vec<f64> = auc.series.points.iter().map(|p| p.value).collect();
        assert_eq!(auc_values, vec![0.50, 0.67, 0.66]);
        assert_eq!(auc.series.name, "AUC");

        let recall = model_comparison_chart(&models, PerformanceMetric::Recall);
        let recall_values: Vec<f64> = recall.series.points.iter().map(|p| p.value).collect();
        assert_eq!(recall_values, vec![0.0, 0.35, 0.33]);
        assert_eq!(recall.series.name, "RECALL");

        let labels: Vec<_> = recall.series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Logistic Regression", "Random Forest", "XGBoost"]);
    }

    #[test]
    fn every_metric_has_a_full_column() {
        let models = model_performance();
        for metric in PerformanceMetric::ALL {
            let chart = model_comparison_chart(&models, metric);
            assert_eq!(chart.series.points.len(), models.len());
            assert!(chart.series.points.iter().all(|p| (0.0..=1.0).contains(&p.value)));
        }
    }

    #[test]
    fn distribution_summary_matches_sample_counts() {
        let summary = DistributionSummary::from_counts(LEGITIMATE_COUNT, FRAUD_COUNT);
        assert_eq!(summary.total, "555,719");
        assert_eq!(summary.legitimate, "553,574");
        assert_eq!(summary.fraud, "2,145");
        assert_eq!(summary.fraud_rate, "0.3860%");
    }

    #[test]
    fn hourly_chart_has_one_bar_per_hour() {
        let chart = hourly_chart(&fraud_by_hour(|| 0.5));
        assert_eq!(chart.series.points.len(), 24);
        assert_eq!(chart.series.points[0].label, "0");
        assert!((chart.series.points[0].value - 0.125).abs() < 1e-12);
    }
}
