//! Volunteer model and the request/response bodies of the volunteer routes.

use serde::{Deserialize, Serialize};

use crate::models::{Project, Skill};

/// A registered volunteer with eagerly loaded relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: String,
    pub name: String,
    /// Unique natural key; registration upserts on this.
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,
    pub student: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_attended_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_on_one_attended_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for registering a volunteer.
///
/// `skills` carries a single skill name; the skill and the join record are
/// find-or-created alongside the volunteer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVolunteerRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub slack_user_id: Option<String>,
    #[serde(default)]
    pub pronouns: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
}

/// Request body for editing a volunteer. All fields optional; `skill_id`
/// attaches an existing skill before the field update is applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVolunteerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub slack_user_id: Option<String>,
    #[serde(default)]
    pub pronouns: Option<String>,
    #[serde(default)]
    pub employer: Option<String>,
    #[serde(default)]
    pub student: Option<bool>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub onboarding_attended_at: Option<String>,
    #[serde(default)]
    pub one_on_one_attended_at: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub skill_id: Option<String>,
}

/// Request body for assigning a volunteer to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignVolunteerRequest {
    pub volunteer_id: String,
    pub project_id: String,
}

/// Request body for the Slack workspace lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackExistsRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Response body of the Slack workspace lookup. Always delivered with
/// HTTP 200; failures degrade to `exists: false` with a reason attached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlackExistsResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Raw upstream payload, echoed on malformed envelopes for front-end debugging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl SlackExistsResponse {
    /// A degraded lookup result carrying the failure reason.
    pub fn not_found(error: impl Into<String>) -> Self {
        Self {
            exists: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
