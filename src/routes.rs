use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{
    ActionRequest, ActionResponse, ContrastQuery, ContrastReport, ErrorBody, Notification,
    StateResponse,
};
use crate::session::{self, ColorPair, UuidColorSource};
use crate::wcag::ParseColorError;

static INDEX_HTML: &str = include_str!("../client/index.html");

// Security headers for HTML responses
const CSP: &str = "default-src 'self'; script-src 'self'; style-src 'self'; img-src 'self' data:; connect-src 'self'; base-uri 'self'; form-action 'self'";

fn security_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CSP),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    InvalidColor(#[from] ParseColorError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Rejected request: {}", self);
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    // Routes defined before a layer are the ones it wraps
    Router::new()
        .nest_service("/assets", ServeDir::new(&state.config.assets_dir))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        ))
        .route("/", get(index))
        .route("/api/state", get(get_state))
        .route("/api/contrast", get(get_contrast))
        .route("/api/action", post(post_action))
        .route("/liveness_check", get(health_check))
        .route("/readiness_check", get(health_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn index() -> impl IntoResponse {
    let mut headers = security_headers();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    (headers, Html(INDEX_HTML))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<StateResponse>, ApiError> {
    let initial = state.config.initial.clone();
    let report = ContrastReport::for_pair(&initial)?;
    Ok(Json(StateResponse {
        state: initial,
        report,
    }))
}

pub async fn get_contrast(
    Query(query): Query<ContrastQuery>,
) -> Result<Json<ContrastReport>, ApiError> {
    // Query strings may carry the colors without `#`
    let pair = ColorPair::default()
        .with_foreground(&query.fg)
        .ok_or_else(|| ParseColorError::InvalidHexFormat(query.fg.clone()))?
        .with_background(&query.bg)
        .ok_or_else(|| ParseColorError::InvalidHexFormat(query.bg.clone()))?;
    Ok(Json(ContrastReport::for_pair(&pair)?))
}

pub async fn post_action(
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    request.state.validate()?;

    let mut notifications: Vec<Notification> = Vec::new();
    let outcome = session::apply(
        &request.state,
        &request.action,
        &mut UuidColorSource,
        &mut notifications,
    );
    let report = ContrastReport::for_pair(&outcome.state)?;

    if outcome.accepted {
        info!(
            "{} on {} -> {} ({})",
            outcome.state.fg, outcome.state.bg, report.ratio_display, report.rating.label
        );
    }

    Ok(Json(ActionResponse {
        state: outcome.state,
        report,
        accepted: outcome.accepted,
        notifications,
    }))
}
