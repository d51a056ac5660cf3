//! Firestore connection configuration.
//!
//! Constructed once at process start and passed into
//! [`super::FirestoreRestStore`] explicitly; there are no module-level
//! client singletons. Request authentication is handled by a collaborator
//! outside this crate, so no credentials live here.

use thiserror::Error;

/// Production Firestore REST endpoint host.
pub const DEFAULT_FIRESTORE_HOST: &str = "https://firestore.googleapis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Settings for reaching one Firestore database.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// Google Cloud project id.
    pub project_id: String,
    /// Host override for the Firestore emulator or an in-process test
    /// server. `None` means the production endpoint.
    pub base_url: Option<String>,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Load from the environment: `FIREBASE_PROJECT_ID` (required) and
    /// `FIRESTORE_BASE_URL` (optional host override).
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = std::env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| ConfigError::MissingVar("FIREBASE_PROJECT_ID"))?;
        let base_url = std::env::var("FIRESTORE_BASE_URL").ok();
        Ok(Self {
            project_id,
            base_url,
        })
    }

    /// Root URL for document operations:
    /// `{host}/v1/projects/{project}/databases/(default)/documents`.
    pub fn documents_url(&self) -> String {
        let host = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_FIRESTORE_HOST)
            .trim_end_matches('/');
        format!(
            "{host}/v1/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    /// Database-root prefix of fully qualified resource names:
    /// `projects/{project}/databases/(default)/documents`.
    pub fn database_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.project_id
        )
    }
}
