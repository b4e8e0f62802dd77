//! Optional Prometheus middleware.
//!
//! The layer always wraps the app so the service type stays the same whether
//! or not a registry could be built; when disabled it only boxes the body.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

/// Metric namespace and scrape path.
const NAMESPACE: &str = "daybook";
const ENDPOINT: &str = "/metrics";

/// Build request metrics, logging and returning `None` when the registry
/// rejects them.
pub(crate) fn initialize_metrics<F, E>(make: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match make() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "prometheus metrics disabled");
            None
        }
    }
}

/// Default request metrics exposed at `/metrics`.
pub(crate) fn default_metrics() -> Option<PrometheusMetrics> {
    initialize_metrics(|| {
        PrometheusMetricsBuilder::new(NAMESPACE)
            .endpoint(ENDPOINT)
            .build()
    })
}

#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl From<Option<PrometheusMetrics>> for MetricsLayer {
    fn from(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

type BoxedService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedService;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::Enabled(metrics) => {
                let pending = Compat::new(PrometheusMetrics::clone(metrics)).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            Self::Disabled => {
                let plain = service.map(ServiceResponse::map_into_boxed_body);
                Box::pin(async move { Ok(boxed::service(plain)) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn registry_failures_disable_metrics() {
        let metrics = initialize_metrics(|| -> Result<PrometheusMetrics, &str> { Err("boom") });
        assert!(metrics.is_none());
    }

    #[rstest]
    fn successful_builds_enable_the_layer() {
        let metrics = initialize_metrics(|| {
            PrometheusMetricsBuilder::new("test")
                .endpoint("/metrics")
                .build()
        });

        assert!(matches!(MetricsLayer::from(metrics), MetricsLayer::Enabled(_)));
    }
}
