//! Registration/session store.
//!
//! Holds the current volunteer's profile and registration-step cursor,
//! mirrored to two files under the session directory (the analog of the
//! browser's two local-storage keys). Every mutation persists before it
//! returns; `load` restores whatever an earlier session left behind.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ApiClient, Error};
use crate::models::CreateVolunteerRequest;

/// Registration has not been started.
pub const STEP_NOT_STARTED: i64 = -1;
/// Registration is complete.
pub const STEP_COMPLETE: i64 = 4;

const PROFILE_FILE: &str = "volunteer.json";
const STEP_FILE: &str = "registration_step.json";

/// The locally held mirror of the signed-in volunteer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub is_authenticated: bool,
    pub not_registered: bool,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_error_message: Option<String>,
}

/// Partial profile fields collected by the sign-up form pages.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub skill: Option<String>,
    pub pronouns: Option<String>,
}

/// Client session store: profile + registration step, persisted on every
/// mutation.
pub struct SessionStore {
    dir: PathBuf,
    api: ApiClient,
    profile: Profile,
    step: i64,
}

impl SessionStore {
    /// Restore the session from the given directory, falling back to the
    /// signed-out defaults when nothing (or nothing readable) is stored.
    pub fn load(dir: impl Into<PathBuf>, api: ApiClient) -> Self {
        let dir = dir.into();

        let profile = fs::read_to_string(dir.join(PROFILE_FILE))
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        let step = fs::read_to_string(dir.join(STEP_FILE))
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(STEP_NOT_STARTED);

        Self {
            dir,
            api,
            profile,
            step,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Move the form cursor and persist it.
    pub fn set_step(&mut self, step: i64) -> Result<(), Error> {
        self.step = step;
        self.persist()
    }

    /// Sign-in entry point: ask the server whether the email belongs to a
    /// Slack workspace member.
    ///
    /// A positive match authenticates the profile with the Slack identity; a
    /// negative one marks it not-registered with skill/pronoun fields
    /// cleared. Both outcomes advance to step 1 (the first form page is next
    /// either way). A failed lookup authenticates nothing: the error is
    /// recorded on the profile for the retry UI and returned to the caller.
    pub async fn slack_exists(&mut self, email: &str) -> Result<bool, Error> {
        match self.api.slack_exists(email).await {
            Ok(response) => {
                self.profile = if response.exists {
                    Profile {
                        is_authenticated: true,
                        not_registered: false,
                        email: email.to_string(),
                        suid: Some(response.suid),
                        name: Some(response.name),
                        ..Profile::default()
                    }
                } else {
                    Profile {
                        is_authenticated: false,
                        not_registered: true,
                        email: email.to_string(),
                        ..Profile::default()
                    }
                };
                self.step = 1;
                self.persist()?;
                Ok(response.exists)
            }
            Err(err) => {
                self.profile = Profile {
                    registration_error_message: Some(err.to_string()),
                    ..self.profile.clone()
                };
                self.persist()?;
                Err(err)
            }
        }
    }

    /// Submit the accumulated profile fields as a registration.
    ///
    /// Success completes the flow (step 4); failure records a user-visible
    /// error message without advancing the step.
    pub async fn register_volunteer(&mut self) -> Result<(), Error> {
        let request = CreateVolunteerRequest {
            name: self.profile.name.clone().unwrap_or_default(),
            email: self.profile.email.clone(),
            slack_user_id: self.profile.suid.clone(),
            pronouns: self.profile.pronouns.clone(),
            skills: self.profile.skill.clone(),
        };

        let result = match self.api.register_volunteer(&request).await {
            Ok(ack) if ack.success => Ok(()),
            Ok(_) => Err(Error::Api("Registration failed.".to_string())),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.profile = Profile {
                    not_registered: false,
                    registration_error_message: None,
                    ..self.profile.clone()
                };
                self.step = STEP_COMPLETE;
                self.persist()?;
                Ok(())
            }
            Err(err) => {
                self.profile = Profile {
                    registration_error_message: Some(err.to_string()),
                    ..self.profile.clone()
                };
                self.persist()?;
                Err(err)
            }
        }
    }

    /// Merge partial form fields into the profile.
    pub fn update_info(&mut self, patch: ProfilePatch) -> Result<(), Error> {
        // Immutable merge: untouched fields carry over from the current value
        self.profile = Profile {
            email: patch.email.unwrap_or_else(|| self.profile.email.clone()),
            name: patch.name.or_else(|| self.profile.name.clone()),
            skill: patch.skill.or_else(|| self.profile.skill.clone()),
            pronouns: patch.pronouns.or_else(|| self.profile.pronouns.clone()),
            ..self.profile.clone()
        };
        self.persist()
    }

    /// Clear the session and its stored state.
    pub fn sign_out(&mut self) -> Result<(), Error> {
        self.profile = Profile::default();
        self.step = STEP_NOT_STARTED;
        fs::remove_file(self.dir.join(PROFILE_FILE)).ok();
        fs::remove_file(self.dir.join(STEP_FILE)).ok();
        Ok(())
    }

    fn persist(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.dir)?;
        fs::write(
            self.dir.join(PROFILE_FILE),
            serde_json::to_string(&self.profile)?,
        )?;
        fs::write(self.dir.join(STEP_FILE), self.step.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &std::path::Path) -> SessionStore {
        SessionStore::load(dir, ApiClient::new("http://127.0.0.1:1"))
    }

    #[test]
    fn test_step_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = store(dir.path());
        assert_eq!(session.step(), STEP_NOT_STARTED);
        session.set_step(2).unwrap();

        let reloaded = store(dir.path());
        assert_eq!(reloaded.step(), 2);
    }

    #[test]
    fn test_update_info_merges_without_clearing() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = store(dir.path());
        session
            .update_info(ProfilePatch {
                name: Some("Ada Lovelace".to_string()),
                skill: Some("design".to_string()),
                ..ProfilePatch::default()
            })
            .unwrap();
        session
            .update_info(ProfilePatch {
                pronouns: Some("she/her".to_string()),
                ..ProfilePatch::default()
            })
            .unwrap();

        let profile = session.profile();
        assert_eq!(profile.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.skill.as_deref(), Some("design"));
        assert_eq!(profile.pronouns.as_deref(), Some("she/her"));

        // The merged profile is what got persisted
        let reloaded = store(dir.path());
        assert_eq!(reloaded.profile(), session.profile());
    }

    #[test]
    fn test_sign_out_clears_stored_state() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = store(dir.path());
        session
            .update_info(ProfilePatch {
                name: Some("Ada".to_string()),
                ..ProfilePatch::default()
            })
            .unwrap();
        session.set_step(3).unwrap();
        session.sign_out().unwrap();

        assert_eq!(session.profile(), &Profile::default());
        assert_eq!(session.step(), STEP_NOT_STARTED);

        let reloaded = store(dir.path());
        assert_eq!(reloaded.profile(), &Profile::default());
        assert_eq!(reloaded.step(), STEP_NOT_STARTED);
    }

    #[tokio::test]
    async fn test_failed_lookup_does_not_authenticate() {
        let dir = tempfile::tempdir().unwrap();

        // Port 1 is unreachable; the lookup must fail at the transport level
        let mut session = store(dir.path());
        let result = session.slack_exists("ada@example.com").await;

        assert!(result.is_err());
        let profile = session.profile();
        assert!(!profile.is_authenticated);
        assert!(profile.registration_error_message.is_some());
        assert_eq!(session.step(), STEP_NOT_STARTED);
    }
}
