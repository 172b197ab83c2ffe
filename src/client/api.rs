//! Typed HTTP client for the CrewMatch API.

use std::time::Duration;

use super::Error;
use crate::api::{Confirmation, RegisterAck};
use crate::models::{
    AssignVolunteerRequest, CreateVolunteerRequest, Project, SlackExistsRequest,
    SlackExistsResponse, Volunteer,
};

/// HTTP client for communicating with the CrewMatch server.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` comes from configuration (`CREWMATCH_API_URL`).
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check whether an email belongs to a Slack workspace member.
    pub async fn slack_exists(&self, email: &str) -> Result<SlackExistsResponse, Error> {
        let response = self
            .http
            .post(self.url("/api/volunteer/slack/exists"))
            .json(&SlackExistsRequest {
                email: Some(email.to_string()),
            })
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Register a volunteer.
    pub async fn register_volunteer(
        &self,
        request: &CreateVolunteerRequest,
    ) -> Result<RegisterAck, Error> {
        let response = self
            .http
            .post(self.url("/api/volunteer"))
            .json(request)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Assign a volunteer to a project.
    pub async fn assign_volunteer(
        &self,
        volunteer_id: &str,
        project_id: &str,
    ) -> Result<Confirmation, Error> {
        let response = self
            .http
            .post(self.url("/api/volunteer/assign"))
            .json(&AssignVolunteerRequest {
                volunteer_id: volunteer_id.to_string(),
                project_id: project_id.to_string(),
            })
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch a single volunteer with relations.
    pub async fn get_volunteer(&self, id: &str) -> Result<Volunteer, Error> {
        let response = self
            .http
            .get(self.url(&format!("/api/volunteer/{}", id)))
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch all projects.
    pub async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        let response = self.http.get(self.url("/api/project")).send().await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read body".to_string());
    Err(Error::Status(status, body))
}
