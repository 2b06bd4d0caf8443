#![allow(non_snake_case)]

mod api;
mod charts;
mod config;
mod fixtures;
mod hooks;
mod models;
mod state;
mod ui;

use api::{ClientError, FraudApiClient};
use config::AppConfig;
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use once_cell::sync::OnceCell;
use tracing::{error, info};
use ui::analytics::AnalyticsPanel;
use ui::prediction::PredictionPanel;

pub(crate) static APP_CONFIG: OnceCell<AppConfig> = OnceCell::new();
pub(crate) static API_CLIENT: OnceCell<FraudApiClient> = OnceCell::new();

fn main() {
    console_error_panic_hook::set_once();
    let config = APP_CONFIG.get_or_init(AppConfig::from_env);
    init_logging(config);
    bootstrap_client(config);
    launch(App);
}

fn init_logging(config: &AppConfig) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(config.profile.log_level());
    });
}

fn bootstrap_client(config: &AppConfig) {
    match FraudApiClient::new(config.clone()) {
        Ok(client) => {
            info!(
                base_url = %config.api_base_url,
                profile = ?config.profile,
                "prediction client initialized"
            );
            let _ = API_CLIENT.set(client);
        }
        Err(err) => {
            report_client_error("failed to initialize prediction client", &err);
        }
    }
}

fn report_client_error(context: &str, err: &ClientError) {
    error!(%context, ?err, kind = err.kind(), "api bootstrap error");
}

#[component]
fn App() -> Element {
    rsx! {
        div { class: "relative",
            Router::<Route> {}
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Dashboard {},
}

#[component]
fn Dashboard() -> Element {
    rsx! {
        div { class: "app-shell",
            PredictionPanel {}
            div { class: "my-8" }
            AnalyticsPanel {}
        }
    }
}
