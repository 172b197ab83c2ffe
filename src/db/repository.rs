//! Database repository for CRUD operations.
//!
//! The registration pipeline runs inside a single transaction so a failing
//! step leaves no partial rows behind.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreateProjectRequest, CreateVolunteerRequest, Project, ProjectLink, Skill,
    UpdateProjectRequest, UpdateVolunteerRequest, Volunteer,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

const VOLUNTEER_COLUMNS: &str = "id, name, email, slack_user_id, pronouns, employer, student, \
     job_title, onboarding_attended_at, one_on_one_attended_at, project_id, created_at, updated_at";

const PROJECT_COLUMNS: &str = "id, name, description, current_needs, meeting_cadence, tech_stack, \
     additional_info, links, created_at, updated_at";

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== VOLUNTEER OPERATIONS ====================

    /// List all volunteers with their skill and project relations loaded.
    pub async fn list_volunteers(&self) -> Result<Vec<Volunteer>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM volunteers ORDER BY name",
            VOLUNTEER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut volunteers: Vec<Volunteer> =
            rows.iter().map(volunteer_from_row).collect();

        // Attach skills in one pass over the join table
        let skill_rows = sqlx::query(
            "SELECT vs.volunteer_id, s.id, s.name, s.created_at
             FROM volunteer_skills vs
             JOIN skills s ON s.id = vs.skill_id
             ORDER BY s.name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut skills_by_volunteer: HashMap<String, Vec<Skill>> = HashMap::new();
        for row in &skill_rows {
            let volunteer_id: String = row.get("volunteer_id");
            skills_by_volunteer
                .entry(volunteer_id)
                .or_default()
                .push(skill_from_row(row));
        }

        let projects: HashMap<String, Project> = self
            .list_projects()
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        for volunteer in &mut volunteers {
            volunteer.skills = skills_by_volunteer
                .remove(&volunteer.id)
                .unwrap_or_default();
            volunteer.project = volunteer
                .project_id
                .as_ref()
                .and_then(|id| projects.get(id).cloned());
        }

        Ok(volunteers)
    }

    /// Get a volunteer by ID, with relations loaded.
    pub async fn get_volunteer(&self, id: &str) -> Result<Option<Volunteer>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM volunteers WHERE id = ?",
            VOLUNTEER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut volunteer = volunteer_from_row(&row);
        volunteer.skills = self.skills_for_volunteer(id).await?;
        if let Some(project_id) = volunteer.project_id.clone() {
            volunteer.project = self.get_project(&project_id).await?;
        }

        Ok(Some(volunteer))
    }

    /// Register a volunteer: find-or-create the volunteer by email, then the
    /// skill by name, then the join record by (volunteer, skill) pair.
    ///
    /// All three steps run in one transaction and short-circuit on the first
    /// failure, so the write is all-or-nothing.
    pub async fn register_volunteer(
        &self,
        request: &CreateVolunteerRequest,
    ) -> Result<Volunteer, AppError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT id FROM volunteers WHERE email = ?")
            .bind(&request.email)
            .fetch_optional(&mut *tx)
            .await?;

        let volunteer_id = match existing {
            Some(row) => row.get("id"),
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                sqlx::query(
                    "INSERT INTO volunteers (id, name, email, slack_user_id, pronouns, student, created_at, updated_at)
                     VALUES (?, ?, ?, ?, ?, 0, ?, ?)",
                )
                .bind(&id)
                .bind(&request.name)
                .bind(&request.email)
                .bind(&request.slack_user_id)
                .bind(&request.pronouns)
                .bind(&now)
                .bind(&now)
                .execute(&mut *tx)
                .await?;
                id
            }
        };

        if let Some(skill_name) = request.skills.as_deref().filter(|s| !s.trim().is_empty()) {
            let existing_skill = sqlx::query("SELECT id FROM skills WHERE name = ?")
                .bind(skill_name)
                .fetch_optional(&mut *tx)
                .await?;

            let skill_id: String = match existing_skill {
                Some(row) => row.get("id"),
                None => {
                    let id = uuid::Uuid::new_v4().to_string();
                    sqlx::query("INSERT INTO skills (id, name, created_at) VALUES (?, ?, ?)")
                        .bind(&id)
                        .bind(skill_name)
                        .bind(&now)
                        .execute(&mut *tx)
                        .await?;
                    id
                }
            };

            sqlx::query(
                "INSERT OR IGNORE INTO volunteer_skills (volunteer_id, skill_id, created_at)
                 VALUES (?, ?, ?)",
            )
            .bind(&volunteer_id)
            .bind(&skill_id)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_volunteer(&volunteer_id)
            .await?
            .ok_or_else(|| AppError::Internal("Registered volunteer vanished".to_string()))
    }

    /// Update a volunteer, attaching a skill first when `skill_id` is set.
    pub async fn update_volunteer(
        &self,
        id: &str,
        request: &UpdateVolunteerRequest,
    ) -> Result<Volunteer, AppError> {
        let existing = self
            .get_volunteer(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Volunteer {} does not exist.", id)))?;

        if let Some(skill_id) = &request.skill_id {
            self.attach_skill(id, skill_id).await?;
        }

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let email = request.email.as_ref().unwrap_or(&existing.email);
        let slack_user_id = request
            .slack_user_id
            .clone()
            .or(existing.slack_user_id.clone());
        let pronouns = request.pronouns.clone().or(existing.pronouns.clone());
        let employer = request.employer.clone().or(existing.employer.clone());
        let student = request.student.unwrap_or(existing.student);
        let job_title = request.job_title.clone().or(existing.job_title.clone());
        let onboarding_attended_at = request
            .onboarding_attended_at
            .clone()
            .or(existing.onboarding_attended_at.clone());
        let one_on_one_attended_at = request
            .one_on_one_attended_at
            .clone()
            .or(existing.one_on_one_attended_at.clone());
        let project_id = request.project_id.clone().or(existing.project_id.clone());

        sqlx::query(
            "UPDATE volunteers SET name = ?, email = ?, slack_user_id = ?, pronouns = ?,
                 employer = ?, student = ?, job_title = ?, onboarding_attended_at = ?,
                 one_on_one_attended_at = ?, project_id = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(name)
        .bind(email)
        .bind(&slack_user_id)
        .bind(&pronouns)
        .bind(&employer)
        .bind(student as i32)
        .bind(&job_title)
        .bind(&onboarding_attended_at)
        .bind(&one_on_one_attended_at)
        .bind(&project_id)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_volunteer(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Volunteer {} does not exist.", id)))
    }

    /// Delete a volunteer.
    pub async fn delete_volunteer(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM volunteers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Volunteer {} does not exist.",
                id
            )));
        }

        Ok(())
    }

    /// Point a volunteer at a project, overwriting any previous assignment.
    pub async fn assign_project(
        &self,
        volunteer_id: &str,
        project_id: &str,
    ) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query("UPDATE volunteers SET project_id = ?, updated_at = ? WHERE id = ?")
            .bind(project_id)
            .bind(&now)
            .bind(volunteer_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Volunteer {} could not be found.",
                volunteer_id
            )));
        }

        Ok(())
    }

    // ==================== SKILL OPERATIONS ====================

    /// List all skills.
    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query("SELECT id, name, created_at FROM skills ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(skill_from_row).collect())
    }

    /// Find a skill by name, creating it when absent.
    pub async fn find_or_create_skill(&self, name: &str) -> Result<Skill, AppError> {
        let existing = sqlx::query("SELECT id, name, created_at FROM skills WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = existing {
            return Ok(skill_from_row(&row));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        sqlx::query("INSERT INTO skills (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(Skill {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    /// Associate a skill with a volunteer. Idempotent on the (volunteer, skill) pair.
    pub async fn attach_skill(&self, volunteer_id: &str, skill_id: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT OR IGNORE INTO volunteer_skills (volunteer_id, skill_id, created_at)
             VALUES (?, ?, ?)",
        )
        .bind(volunteer_id)
        .bind(skill_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn skills_for_volunteer(&self, volunteer_id: &str) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query(
            "SELECT s.id, s.name, s.created_at
             FROM volunteer_skills vs
             JOIN skills s ON s.id = vs.skill_id
             WHERE vs.volunteer_id = ?
             ORDER BY s.name",
        )
        .bind(volunteer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(skill_from_row).collect())
    }

    // ==================== PROJECT OPERATIONS ====================

    /// List all projects.
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM projects ORDER BY name",
            PROJECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(project_from_row).collect())
    }

    /// Get a project by ID.
    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM projects WHERE id = ?", PROJECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(project_from_row))
    }

    /// Create a new project.
    pub async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let needs_json = serde_json::to_string(&request.current_needs).unwrap_or_default();
        let stack_json = serde_json::to_string(&request.tech_stack).unwrap_or_default();
        let links_json = serde_json::to_string(&request.links).unwrap_or_default();

        sqlx::query(
            "INSERT INTO projects (id, name, description, current_needs, meeting_cadence,
                 tech_stack, additional_info, links, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&needs_json)
        .bind(&request.meeting_cadence)
        .bind(&stack_json)
        .bind(&request.additional_info)
        .bind(&links_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Project {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            current_needs: request.current_needs.clone(),
            meeting_cadence: request.meeting_cadence.clone(),
            tech_stack: request.tech_stack.clone(),
            additional_info: request.additional_info.clone(),
            links: request.links.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a project.
    pub async fn update_project(
        &self,
        id: &str,
        request: &UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let existing = self
            .get_project(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} does not exist.", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let description = request.description.clone().or(existing.description.clone());
        let current_needs = request
            .current_needs
            .clone()
            .unwrap_or(existing.current_needs.clone());
        let meeting_cadence = request
            .meeting_cadence
            .clone()
            .or(existing.meeting_cadence.clone());
        let tech_stack = request
            .tech_stack
            .clone()
            .unwrap_or(existing.tech_stack.clone());
        let additional_info = request
            .additional_info
            .clone()
            .or(existing.additional_info.clone());
        let links = request.links.clone().unwrap_or(existing.links.clone());

        let needs_json = serde_json::to_string(&current_needs).unwrap_or_default();
        let stack_json = serde_json::to_string(&tech_stack).unwrap_or_default();
        let links_json = serde_json::to_string(&links).unwrap_or_default();

        sqlx::query(
            "UPDATE projects SET name = ?, description = ?, current_needs = ?,
                 meeting_cadence = ?, tech_stack = ?, additional_info = ?, links = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(name)
        .bind(&description)
        .bind(&needs_json)
        .bind(&meeting_cadence)
        .bind(&stack_json)
        .bind(&additional_info)
        .bind(&links_json)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Project {
            id: id.to_string(),
            name: name.clone(),
            description,
            current_needs,
            meeting_cadence,
            tech_stack,
            additional_info,
            links,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a project.
    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Project {} does not exist.",
                id
            )));
        }

        Ok(())
    }
}

// Helper functions for row conversion

fn volunteer_from_row(row: &sqlx::sqlite::SqliteRow) -> Volunteer {
    let student: i32 = row.get("student");
    Volunteer {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        slack_user_id: row.get("slack_user_id"),
        pronouns: row.get("pronouns"),
        employer: row.get("employer"),
        student: student != 0,
        job_title: row.get("job_title"),
        onboarding_attended_at: row.get("onboarding_attended_at"),
        one_on_one_attended_at: row.get("one_on_one_attended_at"),
        project_id: row.get("project_id"),
        skills: Vec::new(),
        project: None,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn skill_from_row(row: &sqlx::sqlite::SqliteRow) -> Skill {
    Skill {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}

fn project_from_row(row: &sqlx::sqlite::SqliteRow) -> Project {
    let needs_str: Option<String> = row.get("current_needs");
    let stack_str: Option<String> = row.get("tech_stack");
    let links_str: Option<String> = row.get("links");

    Project {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        current_needs: needs_str.map(|s| parse_json_array(&s)).unwrap_or_default(),
        meeting_cadence: row.get("meeting_cadence"),
        tech_stack: stack_str.map(|s| parse_json_array(&s)).unwrap_or_default(),
        additional_info: row.get("additional_info"),
        links: links_str.map(|s| parse_links(&s)).unwrap_or_default(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

fn parse_links(s: &str) -> Vec<ProjectLink> {
    serde_json::from_str(s).unwrap_or_default()
}
