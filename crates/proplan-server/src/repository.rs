//! Data access behind the service facade.
//!
//! [`ActivityRepository`] is the capability the facade depends on.
//! [`StaticRepository`] is the implementation used by the server: it serves
//! the parameter list and analytics contract from JSON files loaded once at
//! start-up, builds launch URLs from the configured base URL, and produces
//! mock analytics.

use std::path::{Path, PathBuf};

use proplan_types::{ActivityId, ActivityParam, AnalyticsContract, StudentAnalytics};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::analytics;
use crate::config::ProviderConfig;

/// Built-in configuration page served at `config_url`.
const DEFAULT_CONFIG_PAGE: &str = include_str!("../templates/config_proplan.html");

/// Errors raised by a repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store cannot serve the request.
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// A backing file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A backing file is not valid JSON for its expected shape.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of activity data for the facade.
pub trait ActivityRepository: Send + Sync {
    /// Analytics records for every student of `activity_id`.
    fn get_analytics(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Vec<StudentAnalytics>, RepositoryError>;

    /// Deploys `activity_id` and returns its launch URL.
    fn deploy_activity(&self, activity_id: &ActivityId) -> Result<String, RepositoryError>;

    /// Parameters the activity can be configured with.
    fn get_json_params(&self) -> Result<Vec<ActivityParam>, RepositoryError>;

    /// HTML of the configuration page.
    fn get_config_page(&self) -> Result<String, RepositoryError>;

    /// The analytics contract.
    fn get_analytics_contract(&self) -> Result<AnalyticsContract, RepositoryError>;
}

/// Reads a JSON file, returning `default` if it does not exist.
///
/// # Errors
///
/// Any other I/O failure or a parse failure is an error.
pub fn load_json_or<T: DeserializeOwned>(path: &Path, default: T) -> Result<T, RepositoryError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "data file not found, using defaults");
            return Ok(default);
        }
        Err(source) => {
            return Err(RepositoryError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&contents).map_err(|source| RepositoryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// File-backed, in-memory repository with mock analytics.
#[derive(Debug, Clone)]
pub struct StaticRepository {
    base_url: String,
    student_id: String,
    params: Vec<ActivityParam>,
    contract: AnalyticsContract,
    config_page: String,
}

impl StaticRepository {
    /// Builds a repository from already-loaded data.
    pub fn new(
        base_url: impl Into<String>,
        student_id: impl Into<String>,
        params: Vec<ActivityParam>,
        contract: AnalyticsContract,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            student_id: student_id.into(),
            params,
            contract,
            config_page: DEFAULT_CONFIG_PAGE.to_string(),
        }
    }

    /// Loads parameters, contract and (optionally) the config page from the
    /// paths in `config`. Missing data files fall back to empty defaults.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a file exists but cannot be read or parsed.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, RepositoryError> {
        let params: Vec<ActivityParam> = load_json_or(&config.json_params_path, Vec::new())?;
        let contract: AnalyticsContract =
            load_json_or(&config.analytics_schema_path, AnalyticsContract::default())?;

        tracing::info!(
            params = params.len(),
            quant = contract.quant_analytics.len(),
            qual = contract.qual_analytics.len(),
            "loaded activity data"
        );

        let mut repo = Self::new(&config.base_url, &config.student_id, params, contract);
        if let Some(path) = &config.config_page_path {
            repo.config_page =
                std::fs::read_to_string(path).map_err(|source| RepositoryError::Io {
                    path: path.clone(),
                    source,
                })?;
        }
        Ok(repo)
    }

    /// Launch URL of `activity_id`.
    pub fn access_url(&self, activity_id: &ActivityId) -> String {
        format!("{}/atividade/{}", self.base_url, activity_id)
    }
}

impl ActivityRepository for StaticRepository {
    fn get_analytics(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Vec<StudentAnalytics>, RepositoryError> {
        Ok(vec![analytics::mock_student_analytics(
            &self.contract,
            &self.base_url,
            activity_id,
            &self.student_id,
        )])
    }

    fn deploy_activity(&self, activity_id: &ActivityId) -> Result<String, RepositoryError> {
        Ok(self.access_url(activity_id))
    }

    fn get_json_params(&self) -> Result<Vec<ActivityParam>, RepositoryError> {
        Ok(self.params.clone())
    }

    fn get_config_page(&self) -> Result<String, RepositoryError> {
        Ok(self.config_page.clone())
    }

    fn get_analytics_contract(&self) -> Result<AnalyticsContract, RepositoryError> {
        Ok(self.contract.clone())
    }
}
