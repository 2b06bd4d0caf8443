use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::API_CLIENT;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServiceStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

impl ServiceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Checking => "Checking model service...",
            Self::Online => "Model service online",
            Self::Offline => "Model service unreachable",
        }
    }

    pub fn dot_class(self) -> &'static str {
        match self {
            Self::Checking => "bg-gray-400",
            Self::Online => "bg-green-500",
            Self::Offline => "bg-red-500",
        }
    }
}

/// Probes `/health` once on mount.
pub fn use_service_health() -> Signal<ServiceStatus> {
    let mut status = use_signal(ServiceStatus::default);

    use_future(move || async move {
        TimeoutFuture::new(0).await;

        let Some(client) = API_CLIENT.get().cloned() else {
            status.set(ServiceStatus::Offline);
            return;
        };

        match client.health().await {
            Ok(health) if health.is_online() => status.set(ServiceStatus::Online),
            Ok(health) => {
                tracing::warn!(status = %health.status, "model service reports unhealthy");
                status.set(ServiceStatus::Offline);
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), "health check failed: {err}");
                status.set(ServiceStatus::Offline);
            }
        }
    });

    status
}
