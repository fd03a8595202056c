use super::actions::Action;
use super::state::AppState;
use super::store::{StateStore, Store};
use super::stream::Subscription;
use crate::workspace::{load_workspace, write_workspace, Workspace};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

/// Services application actions against the workspace file: loads the list
/// on request and writes accepted renames and deletes back.
pub struct ApplicationEffects {
    _subscription: Subscription,
}

impl ApplicationEffects {
    pub fn register(store: &Rc<Store>, workspace_path: PathBuf) -> Self {
        let weak: Weak<Store> = Rc::downgrade(store);
        let subscription = store.actions().subscribe(move |action: &Action| {
            let Some(store) = weak.upgrade() else {
                return;
            };
            match action {
                Action::LoadApplications => load(&store, &workspace_path),
                action if action.is_mutation() => persist(&store, &workspace_path, &store.state()),
                _ => {}
            }
        });

        Self {
            _subscription: subscription,
        }
    }
}

fn load(store: &Store, path: &Path) {
    match load_workspace(path) {
        Ok(workspace) => {
            tracing::info!(
                path = %path.display(),
                applications = workspace.applications.len(),
                "workspace loaded"
            );
            store.dispatch(Action::LoadApplicationsSuccess {
                applications: workspace.applications,
                user: workspace.user,
            });
        }
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %format!("{:#}", error),
                "workspace load failed"
            );
            store.dispatch(Action::LoadApplicationsFail {
                error: format!("{:#}", error),
            });
        }
    }
}

fn persist(store: &Store, path: &Path, state: &AppState) {
    // A rejected request leaves its reason in `last_error` and nothing to save.
    if state.last_error.is_some() {
        return;
    }
    // Saving a list that failed to reload would overwrite the file on disk.
    if !state.workspace_loaded {
        tracing::warn!(path = %path.display(), "workspace not loaded; refusing to save");
        store.dispatch(Action::PersistFail {
            error: "Workspace is not loaded; reload (R) before making changes".to_string(),
        });
        return;
    }
    match write_workspace(path, &Workspace::from_state(state)) {
        Ok(()) => tracing::info!(path = %path.display(), "workspace saved"),
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %format!("{:#}", error),
                "workspace save failed"
            );
            store.dispatch(Action::PersistFail {
                error: format!("{:#}", error),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{Application, Role, User};
    use crate::workspace::load_workspace;
    use std::fs;

    fn write_sample(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let workspace = Workspace {
            user: User {
                email: "jane@example.com".to_string(),
                role: Role::User,
            },
            applications: vec![
                Application::new("app-1", "Billing", Some(Role::Owner)),
                Application::new("app-2", "Search", None),
            ],
        };
        write_workspace(&path, &workspace).unwrap();
        path
    }

    #[test]
    fn test_load_applications_from_workspace() {
        let path = write_sample("app_header_effects_load.toml");
        let store = Rc::new(Store::default());
        let _effects = ApplicationEffects::register(&store, path.clone());

        store.dispatch(Action::LoadApplications);

        let state = store.state();
        assert!(!state.is_loading_app_list);
        assert_eq!(state.applications.len(), 2);
        assert_eq!(state.selected_app_id.as_deref(), Some("app-1"));
        assert_eq!(state.user.email, "jane@example.com");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_failure_is_reported_in_state() {
        let path = std::env::temp_dir().join("app_header_effects_missing.toml");
        fs::remove_file(&path).ok();
        let store = Rc::new(Store::default());
        let _effects = ApplicationEffects::register(&store, path);

        store.dispatch(Action::LoadApplications);

        let state = store.state();
        assert!(!state.is_loading_app_list);
        assert!(state.last_error.unwrap().contains("Failed to read workspace file"));
    }

    #[test]
    fn test_accepted_rename_is_saved() {
        let path = write_sample("app_header_effects_rename.toml");
        let store = Rc::new(Store::default());
        let _effects = ApplicationEffects::register(&store, path.clone());

        store.dispatch(Action::LoadApplications);
        store.dispatch(Action::UpdateApplication {
            id: Some("app-2".to_string()),
            name: "Discovery".to_string(),
        });

        let saved = load_workspace(&path).unwrap();
        assert_eq!(saved.applications[1].name, "Discovery");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rejected_delete_is_not_saved() {
        let path = write_sample("app_header_effects_rejected.toml");
        let store = Rc::new(Store::default());
        let _effects = ApplicationEffects::register(&store, path.clone());

        store.dispatch(Action::LoadApplications);
        store.dispatch(Action::DeleteApplication { id: None });

        let saved = load_workspace(&path).unwrap();
        assert_eq!(saved.applications.len(), 2);
        assert_eq!(store.state().last_error.as_deref(), Some("No application selected"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_failed_reload_blocks_saving_over_the_file() {
        let path = write_sample("app_header_effects_failed_reload.toml");
        let store = Rc::new(Store::default());
        let _effects = ApplicationEffects::register(&store, path.clone());
        store.dispatch(Action::LoadApplications);

        let edited = "[user]\nemail = \"jane@example.com\"\nrole = \"USER\"\n\
                      [[applications]\nid = \"app-3\"\n";
        fs::write(&path, edited).unwrap();
        store.dispatch(Action::LoadApplications);
        assert!(!store.state().workspace_loaded);

        store.dispatch(Action::UpdateApplication {
            id: Some("app-1".to_string()),
            name: "Payments".to_string(),
        });

        assert_eq!(fs::read_to_string(&path).unwrap(), edited);
        assert!(store.state().last_error.unwrap().contains("not loaded"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_dropping_effects_stops_servicing_actions() {
        let path = write_sample("app_header_effects_dropped.toml");
        let store = Rc::new(Store::default());
        let effects = ApplicationEffects::register(&store, path.clone());
        drop(effects);

        store.dispatch(Action::LoadApplications);
        assert!(store.state().is_loading_app_list);

        fs::remove_file(&path).ok();
    }
}
