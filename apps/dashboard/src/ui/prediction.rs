use dioxus::prelude::*;
use time::macros::format_description;

use crate::charts::{Axis, BarChartSpec, DataPoint, RadialGaugeSpec, Series, ValueFormat};
use crate::hooks::health::use_service_health;
use crate::hooks::prediction::use_prediction_runner;
use crate::models::{
    risk_percent, FeatureField, FeatureImportanceEntry, Recommendation, RiskBucket, RiskFactor,
    RiskImpact,
};
use crate::state::{use_prediction_state, PredictionActions, PredictionView};
use crate::ui::chart::{BarChart, RadialGauge};
use crate::ui::format::{format_factor_value, hour_label, CITY_SIZES, MONTHS, WEEKDAYS};
use crate::API_CLIENT;

#[component]
pub fn PredictionPanel() -> Element {
    let state = use_prediction_state();
    let runner = use_prediction_runner(state);
    let actions = PredictionActions::new(state);
    let service_status = *use_service_health().read();
    let status_label = service_status.label();

    let snapshot = state.read().clone();
    let form = snapshot.form.clone();
    let is_loading = snapshot.is_loading();

    let endpoint = API_CLIENT
        .get()
        .map(|client| client.config().predict_endpoint())
        .unwrap_or_else(|| "prediction client not configured".to_string());

    let results = if is_loading {
        render_loading()
    } else if let Some(view) = snapshot.prediction() {
        render_result(view, &snapshot.risk_factors)
    } else {
        render_placeholder()
    };

    rsx! {
        section { class: "max-w-6xl mx-auto p-6 bg-white rounded-xl shadow-lg",
            header { class: "flex flex-col items-center mb-8 gap-2",
                h1 { class: "text-3xl font-bold text-gray-800", "Credit Card Fraud Detection System" }
                div { class: "flex items-center gap-2 text-xs text-gray-500",
                    span { class: format!("inline-block h-2 w-2 rounded-full {}", service_status.dot_class()) }
                    span { "{status_label}" }
                    span { class: "text-gray-400", "· {endpoint}" }
                }
            }

            div { class: "grid grid-cols-1 lg:grid-cols-3 gap-8",
                div { class: "lg:col-span-1 bg-gray-50 p-6 rounded-xl shadow",
                    h2 { class: "text-xl font-bold text-gray-800 mb-6", "Transaction Information" }
                    div { class: "space-y-5",
                        label { class: "block",
                            span { class: "block text-sm font-medium text-gray-700 mb-1", "Transaction Amount ($)" }
                            input {
                                r#type: "number",
                                min: "0",
                                step: "0.01",
                                class: "block w-full rounded-md border-gray-300 p-2 sm:text-sm",
                                placeholder: "0.00",
                                value: "{form.amount}",
                                oninput: move |evt| actions.update_field(FeatureField::Amount, &evt.value()),
                            }
                        }

                        div { class: "grid grid-cols-2 gap-4",
                            label { class: "block",
                                span { class: "block text-sm font-medium text-gray-700 mb-1", "Hour of Day (0-23)" }
                                input {
                                    r#type: "range",
                                    min: "0",
                                    max: "23",
                                    class: "w-full h-2 bg-gray-200 rounded-lg cursor-pointer",
                                    value: "{form.hour}",
                                    oninput: move |evt| actions.update_field(FeatureField::Hour, &evt.value()),
                                }
                                div { class: "flex justify-between text-xs",
                                    span { class: "text-gray-500", "0:00" }
                                    span { class: "font-medium text-blue-600", {hour_label(form.hour)} }
                                    span { class: "text-gray-500", "23:00" }
                                }
                            }
                            label { class: "block",
                                span { class: "block text-sm font-medium text-gray-700 mb-1", "Day of Week (0-6)" }
                                select {
                                    class: "block w-full rounded-md border-gray-300 p-2 sm:text-sm",
                                    onchange: move |evt| actions.update_field(FeatureField::DayOfWeek, &evt.value()),
                                    for (index, name) in WEEKDAYS.iter().enumerate() {
                                        option {
                                            value: "{index}",
                                            selected: form.day_of_week as usize == index,
                                            "{name}"
                                        }
                                    }
                                }
                            }
                        }

                        div { class: "grid grid-cols-2 gap-4",
                            label { class: "block",
                                span { class: "block text-sm font-medium text-gray-700 mb-1", "Day of Month (1-31)" }
                                input {
                                    r#type: "number",
                                    min: "1",
                                    max: "31",
                                    class: "block w-full rounded-md border-gray-300 p-2 sm:text-sm",
                                    value: "{form.day_of_month}",
                                    oninput: move |evt| actions.update_field(FeatureField::DayOfMonth, &evt.value()),
                                }
                            }
                            label { class: "block",
                                span { class: "block text-sm font-medium text-gray-700 mb-1", "Month (1-12)" }
                                select {
                                    class: "block w-full rounded-md border-gray-300 p-2 sm:text-sm",
                                    onchange: move |evt| actions.update_field(FeatureField::Month, &evt.value()),
                                    for (index, name) in MONTHS.iter().enumerate() {
                                        option {
                                            value: (index + 1).to_string(),
                                            selected: form.month as usize == index + 1,
                                            "{name}"
                                        }
                                    }
                                }
                            }
                        }

                        label { class: "block",
                            span { class: "block text-sm font-medium text-gray-700 mb-1", "Customer-Merchant Distance (km)" }
                            input {
                                r#type: "range",
                                min: "0",
                                max: "500",
                                step: "5",
                                class: "w-full h-2 bg-gray-200 rounded-lg cursor-pointer",
                                value: "{form.distance_km}",
                                oninput: move |evt| actions.update_field(FeatureField::DistanceKm, &evt.value()),
                            }
                            div { class: "flex justify-between text-xs",
                                span { class: "text-gray-500", "0 km" }
                                span { class: "font-medium text-blue-600", "{form.distance_km} km" }
                                span { class: "text-gray-500", "500 km" }
                            }
                        }

                        label { class: "block",
                            span { class: "block text-sm font-medium text-gray-700 mb-1", "City Population" }
                            select {
                                class: "block w-full rounded-md border-gray-300 p-2 sm:text-sm",
                                onchange: move |evt| actions.update_field(FeatureField::CityPopulation, &evt.value()),
                                for (population, name) in CITY_SIZES.iter() {
                                    option {
                                        value: "{population}",
                                        selected: form.city_population == *population,
                                        "{name}"
                                    }
                                }
                            }
                        }

                        button {
                            class: "w-full flex justify-center py-3 px-4 rounded-md shadow-sm text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed",
                            disabled: is_loading,
                            onclick: move |_| runner.submit(),
                            if is_loading { "Processing..." } else { "Detect Fraud" }
                        }
                    }

                    div { class: "mt-6 text-xs text-gray-500",
                        div { class: "font-semibold mb-1", "Model Information:" }
                        p {
                            "This fraud detection system uses a combination of Random Forest and XGBoost models trained on transaction patterns. Key features include amount, time, distance, and location data."
                        }
                    }
                }

                div { class: "lg:col-span-2 space-y-6", {results} }
            }
        }
    }
}

fn render_loading() -> Element {
    rsx! {
        div { class: "flex flex-col items-center justify-center h-96 bg-gray-50 rounded-xl shadow",
            div { class: "animate-spin rounded-full h-16 w-16 border-t-2 border-b-2 border-blue-600 mb-4" }
            p { class: "text-gray-600 text-lg", "Analyzing transaction patterns..." }
            p { class: "text-gray-500 text-sm mt-2", "Comparing with millions of historical transactions" }
        }
    }
}

fn render_placeholder() -> Element {
    rsx! {
        div { class: "flex flex-col items-center justify-center h-96 bg-gray-50 rounded-xl shadow",
            p { class: "text-lg text-gray-600 mb-2", "Enter transaction details" }
            p { class: "text-sm text-gray-500 text-center max-w-md",
                "Fill in the transaction information on the left and click \"Detect Fraud\" to analyze the transaction for potential fraud risk"
            }
        }
    }
}

fn render_result(view: &PredictionView, risk_factors: &[RiskFactor]) -> Element {
    let bucket = RiskBucket::from_score(Some(view.risk_score));
    let recommendation = Recommendation::for_prediction(view.label, view.risk_score);
    let gauge = RadialGaugeSpec::new(view.risk_score * 100.0, bucket.color());
    let label_class = if view.label.is_fraud() {
        "text-red-600"
    } else {
        "text-green-600"
    };
    let format = format_description!("[hour]:[minute]:[second] UTC");
    let analyzed_at = view.analyzed_at.format(&format).unwrap_or_default();
    let percent = risk_percent(view.risk_score);
    let color = bucket.color();
    let bucket_label = bucket.label();
    let label_text = view.label.display();
    let recommendation_text = recommendation.message();

    rsx! {
        div { class: "space-y-6",
            div { class: format!("p-6 rounded-xl shadow {}", bucket.background_class()),
                div { class: "flex flex-col md:flex-row items-center",
                    div { class: "w-full md:w-1/3 flex flex-col items-center mb-4 md:mb-0",
                        div { class: "mb-2 text-gray-600 font-medium", "Risk Score" }
                        div { class: "relative", style: "width: 120px; height: 120px;",
                            RadialGauge { spec: gauge }
                            div { class: "absolute inset-0 flex items-center justify-center flex-col",
                                span { class: "text-3xl font-bold", style: "color: {color}", "{percent}" }
                                span { class: "text-xs font-medium text-gray-500", "{bucket_label}" }
                            }
                        }
                    }
                    div { class: "w-full md:w-2/3 md:pl-6 md:border-l border-gray-200",
                        div { class: "text-center md:text-left mb-4",
                            div { class: "text-gray-600 font-medium mb-1", "Transaction Classification" }
                            div { class: format!("text-2xl font-bold {label_class}"), "{label_text}" }
                        }
                        div { class: "text-center md:text-left",
                            div { class: "text-gray-600 font-medium mb-2", "Recommendation:" }
                            div { class: format!("{} font-medium", recommendation.text_class()),
                                "{recommendation_text}"
                            }
                        }
                        p { class: "mt-3 text-xs text-gray-400", "Analyzed at {analyzed_at}" }
                    }
                }
            }

            div { class: "grid grid-cols-1 md:grid-cols-2 gap-6",
                div { class: "bg-white p-6 rounded-xl shadow",
                    h3 { class: "text-lg font-medium text-gray-800 mb-4", "Risk Factors" }
                    {render_risk_factors(risk_factors)}
                }
                div { class: "bg-white p-6 rounded-xl shadow",
                    h3 { class: "text-lg font-medium text-gray-800 mb-4", "Feature Importance" }
                    div { class: "h-64",
                        BarChart { spec: importance_chart(&view.feature_importance) }
                    }
                }
            }
        }
    }
}

fn importance_chart(entries: &[FeatureImportanceEntry]) -> BarChartSpec {
    let points = entries
        .iter()
        .map(|entry| DataPoint::new(entry.name.clone(), entry.value))
        .collect();
    BarChartSpec::builder(Series::new("Importance", "#3B82F6", points))
        .horizontal()
        .value_axis(Axis::numeric(0.0, 0.3).extend_to_fit().with_ticks(3))
        .tooltip(ValueFormat::Percent(1))
        .category_width(80.0)
        .build()
}

fn render_risk_factors(factors: &[RiskFactor]) -> Element {
    if factors.is_empty() {
        return rsx! {
            div { class: "text-center text-gray-500 py-4", "No significant risk factors detected" }
        };
    }

    rsx! {
        ul { class: "space-y-3",
            for factor in factors.iter() {
                {render_risk_factor(factor)}
            }
        }
    }
}

fn render_risk_factor(factor: &RiskFactor) -> Element {
    let (bar_class, badge_class) = match factor.impact {
        RiskImpact::High => ("bg-red-500", "bg-red-100 text-red-800"),
        RiskImpact::Medium => ("bg-yellow-500", "bg-yellow-100 text-yellow-800"),
        RiskImpact::Low => ("bg-blue-500", "bg-blue-100 text-blue-800"),
    };

    let impact = factor.impact.as_str();

    rsx! {
        li { class: "flex",
            div { class: format!("flex-shrink-0 w-2 rounded-full self-stretch mr-3 {bar_class}") }
            div {
                div { class: "flex items-center",
                    div { class: "font-medium", "{factor.name}" }
                    div { class: format!("ml-2 px-2 py-0.5 text-xs rounded-full {badge_class}"),
                        "{impact}"
                    }
                }
                div { class: "text-sm text-gray-600", "{factor.description}" }
                div { class: "text-sm font-medium mt-0.5", {format_factor_value(factor.value)} }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_chart_keeps_server_order_and_magnitudes() {
        let spec = importance_chart(&[
            FeatureImportanceEntry { name: "amt".into(), value: 0.5 },
            FeatureImportanceEntry { name: "hour".into(), value: 0.02 },
        ]);
        let labels: Vec<_> = spec.series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["amt", "hour"]);
        assert_eq!(spec.series.points[0].value, 0.5);
        assert_eq!(spec.tooltip.format(0.5), "50.0%");
        assert!(spec.value_axis.auto_extend);
    }
}
