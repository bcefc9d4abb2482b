//! Request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::Html;
use axum::{Form, Json};
use serde::Serialize;
use tracing::{debug, info};

use revdcf_core::{implied_growth_with, GrowthRateSolver, ImpliedGrowthReport};

use crate::config::ServerConfig;
use crate::error::{ApiError, ServerError};
use crate::form::{CalculatorRequest, FormFields};
use crate::pages::{IndexView, Pages, ResultView, INVALID_INPUT_MESSAGE};

/// Application state.
pub struct AppState {
    /// Growth-rate solver shared by every request
    pub solver: GrowthRateSolver,
    /// Compiled page templates
    pub pages: Pages,
    /// Base URL for share links; the request's `Host` is used when unset
    pub public_url: Option<String>,
    /// Base URL used when neither `public_url` nor `Host` is available
    pub bind_url: String,
}

impl AppState {
    /// Builds the state a configuration describes.
    pub fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        Ok(Self {
            solver: config.solver.build()?,
            pages: Pages::new()?,
            public_url: config.public_base_url(),
            bind_url: config.bind_url(),
        })
    }

    fn solve(&self, request: &CalculatorRequest) -> Result<ImpliedGrowthReport, ApiError> {
        let inputs = request.to_inputs()?;
        let report = implied_growth_with(&inputs, &self.solver)?;
        debug!(
            "implied growth {:.6} for valuation {} ({} iterations)",
            report.implied_growth_rate, report.target_valuation, report.iterations
        );
        Ok(report)
    }

    fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(url) = &self.public_url {
            return url.clone();
        }
        headers
            .get(header::HOST)
            .and_then(|host| host.to_str().ok())
            .filter(|host| !host.is_empty())
            .map(|host| format!("http://{host}"))
            .unwrap_or_else(|| self.bind_url.clone())
    }

    fn share_url(&self, headers: &HeaderMap, request: &CalculatorRequest) -> String {
        format!("{}/?{}", self.base_url(headers), request.query_string())
    }

    /// Calculator page for a set of submitted fields.
    fn calculator_page(
        &self,
        headers: &HeaderMap,
        fields: &FormFields,
    ) -> Result<Html<String>, ApiError> {
        let form = fields.echo();
        let view = match fields.parse() {
            Err(reason) => {
                debug!("rejected form input: {}", reason);
                IndexView::with_error(form, INVALID_INPUT_MESSAGE)
            }
            Ok(request) => match self.solve(&request) {
                Ok(report) => IndexView::with_result(
                    form,
                    ResultView::new(&report, self.share_url(headers, &request)),
                ),
                Err(err) => IndexView::with_error(form, err.to_string()),
            },
        };
        Ok(Html(self.pages.index(&view)?))
    }
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Calculator page.
///
/// Renders the empty form unless all five fields are in the query string,
/// in which case the result is computed as if the form had been submitted.
pub async fn index_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(fields): Query<FormFields>,
) -> Result<Html<String>, ApiError> {
    if !fields.is_complete() {
        return Ok(Html(state.pages.index(&IndexView::form(fields.echo()))?));
    }
    info!("calculator link opened");
    state.calculator_page(&headers, &fields)
}

/// Calculator form submission.
pub async fn index_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(fields): Form<FormFields>,
) -> Result<Html<String>, ApiError> {
    info!("calculator form submitted");
    state.calculator_page(&headers, &fields)
}

/// Implied growth from query parameters.
pub async fn implied_growth_query(
    State(state): State<Arc<AppState>>,
    Query(fields): Query<FormFields>,
) -> Result<Json<ImpliedGrowthReport>, ApiError> {
    let request = fields.parse().map_err(ApiError::BadRequest)?;
    Ok(Json(state.solve(&request)?))
}

/// Implied growth from a JSON body.
pub async fn implied_growth_json(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalculatorRequest>, JsonRejection>,
) -> Result<Json<ImpliedGrowthReport>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(state.solve(&request)?))
}
