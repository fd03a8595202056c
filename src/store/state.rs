use super::models::{Application, User};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub applications: Vec<Application>,
    pub selected_app_id: Option<String>,
    pub user: User,
    pub is_loading_app_list: bool,
    pub last_error: Option<String>,
    /// Whether the in-memory list reflects the last successful workspace read.
    pub workspace_loaded: bool,
}

impl AppState {
    pub fn new(
        applications: Vec<Application>,
        selected_app_id: Option<String>,
        user: User,
    ) -> Self {
        Self {
            applications,
            selected_app_id,
            user,
            is_loading_app_list: false,
            last_error: None,
            workspace_loaded: false,
        }
    }

    pub fn find_application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|app| app.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.applications.iter().position(|app| app.id == id)
    }
}
