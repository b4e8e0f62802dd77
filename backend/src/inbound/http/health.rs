//! Health endpoints: orchestration probes plus the public API banner and
//! health check.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report readiness once the server is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether readiness was signalled.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the process still accepts work.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. 200 once the server can handle traffic, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

/// Service name and version.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Banner {
    pub message: String,
    pub version: String,
}

/// Body of `/api/health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "healthy")]
    pub status: String,
}

/// Service name and version.
#[utoipa::path(
    get,
    path = "/api/",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Service banner", body = Banner))
)]
#[get("/")]
pub async fn banner() -> web::Json<Banner> {
    web::Json(Banner {
        message: "Baby Day Book API".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// Always reports `healthy` while the process serves requests.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Service is healthy", body = HealthStatus))
)]
#[get("/health")]
pub async fn api_health() -> web::Json<HealthStatus> {
    web::Json(HealthStatus {
        status: "healthy".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn readiness_follows_state(#[case] mark: bool, #[case] expected: StatusCode) {
        let state = web::Data::new(HealthState::new());
        if mark {
            state.mark_ready();
        }
        let app = test::init_service(App::new().app_data(state).service(ready)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
            .await;

        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
    }

    #[actix_web::test]
    async fn liveness_fails_once_draining() {
        let state = web::Data::new(HealthState::new());
        state.mark_unhealthy();
        let app = test::init_service(App::new().app_data(state).service(live)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn api_banner_and_health_are_public() {
        let app = test::init_service(
            App::new().service(web::scope("/api").service(banner).service(api_health)),
        )
        .await;

        let served: Banner =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/").to_request())
                .await;
        let health: HealthStatus = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/health").to_request(),
        )
        .await;

        assert_eq!(served.message, "Baby Day Book API");
        assert_eq!(health.status, "healthy");
    }
}
