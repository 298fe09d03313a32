use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use sibyl_service::{
	AnswerRequest, AnswerResponse, SemanticSearchRequest, SemanticSearchResponse, ServiceError,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/answers", post(answer))
		.route("/v1/search/semantic", post(semantic_search))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn answer(
	State(state): State<AppState>,
	Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
	let response = state.service.answer_question(payload).await?;

	Ok(Json(response))
}

async fn semantic_search(
	State(state): State<AppState>,
	Json(payload): Json<SemanticSearchRequest>,
) -> Result<Json<SemanticSearchResponse>, ApiError> {
	let response = state.service.semantic_search(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match &err {
			ServiceError::InvalidRequest { .. } => Self {
				status: StatusCode::BAD_REQUEST,
				error_code: "invalid_request".to_string(),
				message: err.to_string(),
			},
			ServiceError::Provider { .. } => Self {
				status: StatusCode::BAD_GATEWAY,
				error_code: "upstream_provider".to_string(),
				message: err.to_string(),
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
