//! Interview command center endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::interviews::{command_center_data, CommandCenterData, CommandCenterRequest};
use crate::{db, AppState};
use yep_common::Error;

/// Query parameters for the command center
///
/// `user_id` identifies the acting user; session handling lives upstream of
/// this service. Filter parameters are advisory and never cause a failure.
#[derive(Debug, Deserialize)]
pub struct CommandCenterQuery {
    pub user_id: String,
    pub scope: Option<String>,
    pub view: Option<String>,
    pub state: Option<String>,
}

/// GET /api/interviews/command-center?user_id=UUID&scope=&view=&state=
///
/// Returns the viewer's unified interview task list: hiring and readiness
/// obligations merged, sorted, filtered, and bucketed by stage.
pub async fn get_command_center(
    State(state): State<AppState>,
    Query(query): Query<CommandCenterQuery>,
) -> Result<Json<CommandCenterData>, CommandCenterError> {
    // Validate UUID format
    Uuid::parse_str(&query.user_id)
        .map_err(|_| CommandCenterError::InvalidUserId(query.user_id.clone()))?;

    let roles = db::load_user_roles(&state.db, &query.user_id)
        .await
        .map_err(|e| CommandCenterError::StoreError(e.to_string()))?;

    let request = CommandCenterRequest {
        user_id: query.user_id,
        roles,
        scope: query.scope,
        view: query.view,
        state: query.state,
    };

    let data = command_center_data(&state.db, request, &state.policy)
        .await
        .map_err(|e| match e {
            Error::NotFound(msg) => CommandCenterError::UserNotFound(msg),
            other => CommandCenterError::StoreError(other.to_string()),
        })?;

    Ok(Json(data))
}

/// Command center errors
#[derive(Debug)]
pub enum CommandCenterError {
    InvalidUserId(String),
    UserNotFound(String),
    StoreError(String),
}

impl IntoResponse for CommandCenterError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CommandCenterError::InvalidUserId(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid user id (must be UUID): {}", id),
            ),
            CommandCenterError::UserNotFound(msg) => (StatusCode::NOT_FOUND, msg),
            CommandCenterError::StoreError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
