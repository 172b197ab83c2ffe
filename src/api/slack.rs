//! Slack lookup endpoint.
//!
//! Never propagates an error to the HTTP layer: every failure path degrades
//! to a 200 response with `exists: false` and a reason attached, so the
//! registration flow stays smooth on the client.

use axum::{extract::State, Json};

use crate::models::{SlackExistsRequest, SlackExistsResponse};
use crate::AppState;

/// POST /api/volunteer/slack/exists - Check whether an email belongs to a
/// workspace member.
pub async fn slack_exists(
    State(state): State<AppState>,
    Json(request): Json<SlackExistsRequest>,
) -> Json<SlackExistsResponse> {
    let Some(email) = request.email.filter(|e| !e.trim().is_empty()) else {
        return Json(SlackExistsResponse::not_found("Email required."));
    };

    match state.slack.lookup_by_email(&email).await {
        Ok(lookup) => {
            if let Some(user) = lookup.envelope.user {
                Json(SlackExistsResponse {
                    suid: user.id,
                    name: user.real_name,
                    exists: true,
                    error: None,
                    response: None,
                })
            } else if let Some(error) = lookup.envelope.error {
                Json(SlackExistsResponse::not_found(error))
            } else {
                Json(SlackExistsResponse {
                    response: Some(lookup.raw),
                    ..SlackExistsResponse::not_found("Slack API response invalid.")
                })
            }
        }
        Err(err) => Json(SlackExistsResponse::not_found(err.message())),
    }
}
