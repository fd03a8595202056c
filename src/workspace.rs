use crate::store::models::{Application, User};
use crate::store::state::AppState;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// On-disk snapshot of the signed-in user and their applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub user: User,
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl Workspace {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            user: state.user.clone(),
            applications: state.applications.clone(),
        }
    }

    fn validate(&self) -> Result<(), WorkspaceError> {
        let mut seen = HashSet::new();
        for app in &self.applications {
            if app.id.trim().is_empty() {
                return Err(WorkspaceError::EmptyId(app.name.clone()));
            }
            if !seen.insert(app.id.as_str()) {
                return Err(WorkspaceError::DuplicateId(app.id.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("application '{0}' has an empty id")]
    EmptyId(String),
    #[error("application id '{0}' appears more than once")]
    DuplicateId(String),
}

pub fn load_workspace(path: &Path) -> Result<Workspace> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read workspace file: {}", path.display()))?;
    parse_workspace(&content)
        .with_context(|| format!("Invalid workspace file: {}", path.display()))
}

pub fn parse_workspace(content: &str) -> Result<Workspace> {
    let workspace: Workspace = toml::from_str(content)?;
    workspace.validate()?;
    Ok(workspace)
}

pub fn write_workspace(path: &Path, workspace: &Workspace) -> Result<()> {
    let content = toml::to_string_pretty(workspace).context("Failed to serialize workspace")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write workspace file: {}", path.display()))?;
    Ok(())
}
