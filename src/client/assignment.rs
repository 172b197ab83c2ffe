//! Assignment widget logic.
//!
//! The match indicator and the assign-button state machine for a rendered
//! project. After a successful assignment the widget re-fetches the
//! volunteer so the caller can render the server-confirmed state.

use super::{ApiClient, Error};
use crate::models::{Project, Volunteer};

/// Whether a volunteer's declared skill appears in a project's current needs.
pub fn is_match(volunteer_skill: &str, project: &Project) -> bool {
    project
        .current_needs
        .iter()
        .any(|need| need == volunteer_skill)
}

/// States the assign button moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignState {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl AssignState {
    /// Display label for the assign button.
    pub fn label(&self) -> &'static str {
        match self {
            AssignState::Idle => "Assign",
            AssignState::Pending => "...",
            AssignState::Succeeded => "Success!",
            AssignState::Failed => "Error :(",
        }
    }
}

/// Drives the assign action for a selected project.
pub struct AssignmentWidget {
    api: ApiClient,
    state: AssignState,
}

impl AssignmentWidget {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: AssignState::Idle,
        }
    }

    pub fn state(&self) -> AssignState {
        self.state
    }

    /// Assign the volunteer to the project and return the re-fetched
    /// volunteer carrying the confirmed assignment.
    pub async fn assign(
        &mut self,
        volunteer_id: &str,
        project_id: &str,
    ) -> Result<Volunteer, Error> {
        self.state = AssignState::Pending;

        let result = async {
            self.api.assign_volunteer(volunteer_id, project_id).await?;
            self.api.get_volunteer(volunteer_id).await
        }
        .await;

        match result {
            Ok(volunteer) => {
                self.state = AssignState::Succeeded;
                Ok(volunteer)
            }
            Err(err) => {
                self.state = AssignState::Failed;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(needs: &[&str]) -> Project {
        Project {
            id: "p1".to_string(),
            name: "Food Pantry Finder".to_string(),
            description: None,
            current_needs: needs.iter().map(|s| s.to_string()).collect(),
            meeting_cadence: None,
            tech_stack: Vec::new(),
            additional_info: None,
            links: Vec::new(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_is_match_membership() {
        let p = project(&["design", "frontend"]);
        assert!(is_match("design", &p));
        assert!(is_match("frontend", &p));
        assert!(!is_match("backend", &p));
        assert!(!is_match("", &p));
    }

    #[test]
    fn test_is_match_empty_needs() {
        let p = project(&[]);
        assert!(!is_match("design", &p));
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(AssignState::Idle.label(), "Assign");
        assert_eq!(AssignState::Pending.label(), "...");
        assert_eq!(AssignState::Succeeded.label(), "Success!");
        assert_eq!(AssignState::Failed.label(), "Error :(");
    }

    #[tokio::test]
    async fn test_failed_assignment_sets_error_state() {
        // Unreachable server
        let mut widget = AssignmentWidget::new(ApiClient::new("http://127.0.0.1:1"));
        let result = widget.assign("v1", "p1").await;

        assert!(result.is_err());
        assert_eq!(widget.state(), AssignState::Failed);
    }
}
