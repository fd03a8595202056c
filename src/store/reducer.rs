use super::actions::Action;
use super::state::AppState;

pub fn reduce(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::LoadApplications => {
            next.is_loading_app_list = true;
            next.last_error = None;
        }
        Action::LoadApplicationsSuccess { applications, user } => {
            next.applications = applications.clone();
            next.user = user.clone();
            next.is_loading_app_list = false;
            next.last_error = None;
            next.workspace_loaded = true;

            let still_present = next
                .selected_app_id
                .as_deref()
                .is_some_and(|id| next.find_application(id).is_some());
            if !still_present {
                next.selected_app_id = next.applications.first().map(|app| app.id.clone());
            }
        }
        Action::LoadApplicationsFail { error } => {
            next.is_loading_app_list = false;
            next.last_error = Some(error.clone());
            next.workspace_loaded = false;
        }
        Action::SelectApplication { id } => {
            next.selected_app_id = id.clone();
            next.last_error = None;
        }
        Action::UpdateApplication { id, name } => match resolve(state, id.as_deref()) {
            Ok(index) => {
                next.applications[index].name = name.clone();
                next.last_error = None;
            }
            Err(error) => reject(&mut next, action, error),
        },
        Action::DeleteApplication { id } => match resolve(state, id.as_deref()) {
            Ok(index) => {
                let removed = next.applications.remove(index);
                if next.selected_app_id.as_deref() == Some(removed.id.as_str()) {
                    next.selected_app_id = next
                        .applications
                        .get(index)
                        .or_else(|| next.applications.last())
                        .map(|app| app.id.clone());
                }
                next.last_error = None;
            }
            Err(error) => reject(&mut next, action, error),
        },
        Action::PersistFail { error } => {
            next.last_error = Some(error.clone());
        }
    }

    next
}

fn resolve(state: &AppState, id: Option<&str>) -> Result<usize, String> {
    let id = id.ok_or_else(|| "No application selected".to_string())?;
    state
        .position_of(id)
        .ok_or_else(|| format!("Application '{}' not found", id))
}

fn reject(next: &mut AppState, action: &Action, error: String) {
    tracing::warn!(action = action.name(), %error, "request rejected");
    next.last_error = Some(error);
}
