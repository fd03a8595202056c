use super::models::{Application, User};

/// A request to change store state. Dispatched actions are reduced first and
/// then published to effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadApplications,
    LoadApplicationsSuccess {
        applications: Vec<Application>,
        user: User,
    },
    LoadApplicationsFail {
        error: String,
    },
    SelectApplication {
        id: Option<String>,
    },
    UpdateApplication {
        id: Option<String>,
        name: String,
    },
    DeleteApplication {
        id: Option<String>,
    },
    PersistFail {
        error: String,
    },
}

impl Action {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::LoadApplications => "[Application] Load Applications",
            Action::LoadApplicationsSuccess { .. } => "[Application] Load Applications Success",
            Action::LoadApplicationsFail { .. } => "[Application] Load Applications Fail",
            Action::SelectApplication { .. } => "[Application] Select Application",
            Action::UpdateApplication { .. } => "[Application] Update Application",
            Action::DeleteApplication { .. } => "[Application] Delete Application",
            Action::PersistFail { .. } => "[Application] Persist Fail",
        }
    }

    /// Whether a successful reduction of this action should be written back
    /// to the workspace file.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Action::UpdateApplication { .. } | Action::DeleteApplication { .. }
        )
    }
}
