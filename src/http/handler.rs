//! HTTP handlers for the recommendation page

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

use super::template::PageRenderer;
use crate::recommend::{RecommendError, Recommender};

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Recommendation failed: {0}")]
    Recommend(#[from] RecommendError),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Result<Self, HttpError> {
        Ok(Self {
            recommender,
            pages: Arc::new(PageRenderer::new()?),
        })
    }
}

/// Posted form body
#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    pub patient_name: String,
}

/// GET /: the empty form
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, HttpError> {
    Ok(Html(state.pages.index(None, None)?))
}

/// POST /: run the pipeline and list the results under the form
pub async fn recommend_handler(
    State(state): State<AppState>,
    Form(form): Form<RecommendForm>,
) -> Result<Html<String>, HttpError> {
    debug!(patient = %form.patient_name, "Recommendation requested");
    let recommendations = state.recommender.recommend(&form.patient_name).await?;
    let page = state
        .pages
        .index(Some(form.patient_name.as_str()), Some(recommendations.as_slice()))?;
    Ok(Html(page))
}
