use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use wakehub_common::error::WakeError;
use wakehub_core::probe::Prober;
use wakehub_core::wol;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/start", get(start))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub online: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub action: &'static str,
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GET /status` — reachability of the configured host. Always 200; an
/// unconfigured probe is a reportable state, not an error.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    if state.config.status_target().is_none() {
        return Json(StatusResponse {
            online: false,
            error: Some("PC_IP or PC_STATUS_IP not configured".to_string()),
        });
    }

    let online = Prober::from_config(&state.config).check().await;
    Json(StatusResponse {
        online,
        error: None,
    })
}

/// `GET /start` — fire the magic packet at the configured host.
pub async fn start(State(state): State<AppState>) -> (StatusCode, Json<ActionResponse>) {
    match wol::wake(&state.config).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ActionResponse {
                action: "start",
                result: "sent",
                message: None,
            }),
        ),
        Err(e) => {
            error!("wake failed: {e}");
            let code = match e {
                WakeError::MacNotConfigured => StatusCode::BAD_REQUEST,
                WakeError::InvalidMac(_) | WakeError::Transmission(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (
                code,
                Json(ActionResponse {
                    action: "start",
                    result: "error",
                    message: Some(e.to_string()),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wakehub_common::config::Config;

    fn state(config: Config) -> AppState {
        AppState::new(config)
    }

    #[tokio::test]
    async fn status_without_addresses_reports_offline_with_an_error() {
        let response = status(State(state(Config::default()))).await;
        assert!(!response.0.online);
        assert_eq!(
            response.0.error.as_deref(),
            Some("PC_IP or PC_STATUS_IP not configured")
        );
    }

    #[tokio::test]
    async fn start_without_a_mac_is_a_bad_request() {
        let (code, body) = start(State(state(Config::default()))).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.action, "start");
        assert_eq!(body.0.result, "error");
        assert_eq!(body.0.message.as_deref(), Some("PC_MAC not configured"));
    }

    #[tokio::test]
    async fn start_with_a_malformed_mac_is_a_server_error() {
        let config = Config {
            mac: Some("not-a-mac".to_string()),
            ..Config::default()
        };
        let (code, body) = start(State(state(config))).await;
        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0.result, "error");
    }

    #[tokio::test]
    async fn start_with_a_valid_mac_reports_sent() {
        // Loopback target keeps the derived broadcast (127.0.0.255:9)
        // on the local stack.
        let config = Config {
            mac: Some("AA:BB:CC:DD:EE:FF".to_string()),
            target_ip: Some("127.0.0.1".to_string()),
            ..Config::default()
        };
        let (code, body) = start(State(state(config))).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.0.action, "start");
        assert_eq!(body.0.result, "sent");
        assert!(body.0.message.is_none());
    }

    #[test]
    fn absent_optional_fields_stay_out_of_the_json() {
        let body = serde_json::to_value(StatusResponse {
            online: true,
            error: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"online": true}));

        let body = serde_json::to_value(ActionResponse {
            action: "start",
            result: "sent",
            message: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"action": "start", "result": "sent"}));
    }
}
