use super::models::{Application, Role};
use super::state::AppState;

pub fn select_applications(state: &AppState) -> Vec<Application> {
    state.applications.clone()
}

pub fn select_current_app_id(state: &AppState) -> Option<String> {
    state.selected_app_id.clone()
}

pub fn select_current_app(state: &AppState) -> Option<Application> {
    state
        .selected_app_id
        .as_deref()
        .and_then(|id| state.find_application(id))
        .cloned()
}

/// The current user's role inside the selected application.
pub fn select_user_role_for_selected_app(state: &AppState) -> Option<Role> {
    select_current_app(state).and_then(|app| app.role)
}

/// The current user's organization-wide role.
pub fn select_current_user_role(state: &AppState) -> Role {
    state.user.role
}

pub fn select_is_loading_application_list(state: &AppState) -> bool {
    state.is_loading_app_list
}

pub fn select_last_error(state: &AppState) -> Option<String> {
    state.last_error.clone()
}
