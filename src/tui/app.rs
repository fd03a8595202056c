use crate::store::actions::Action;
use crate::store::models::{Application, Role};
use crate::store::selectors::{select_applications, select_last_error};
use crate::store::store::{StateStore, Store};
use crate::store::stream::{Observable, Subscription};
use crate::tui::edit::EditState;
use crate::tui::facade::{ApplicationHeaderFacade, Facade};
use crate::tui::handlers::{
    ConfirmDeleteAction, HelpModeAction, KeyHandler, NormalModeAction, RenameModeAction,
};
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
    Rename,
    ConfirmDelete,
}

/// Latest values pushed by the store, read by the renderer.
#[derive(Debug, Default, Clone)]
pub struct HeaderView {
    pub app: Option<Application>,
    pub role: Option<Role>,
    pub is_loading: bool,
    pub applications: Vec<Application>,
    pub selected_id: Option<String>,
    pub last_error: Option<String>,
}

pub struct App {
    store: Rc<Store>,
    pub facade: ApplicationHeaderFacade<Store>,
    view: Rc<RefCell<HeaderView>>,
    _view_subscriptions: Vec<Subscription>,
    pub mode: Mode,
    pub edit_state: EditState,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: Rc<Store>) -> Self {
        let mut facade = ApplicationHeaderFacade::new(Rc::clone(&store));
        let view = Rc::new(RefCell::new(HeaderView::default()));

        let view_subscriptions = vec![
            bind(&view, &facade.app_stream(), |view, app| view.app = app.clone()),
            bind(&view, &facade.effective_role_stream(), |view, role| view.role = *role),
            bind(&view, &facade.loading_stream(), |view, loading| view.is_loading = *loading),
            bind(&view, &facade.selected_id_stream(), |view, id| view.selected_id = id.clone()),
            bind(&view, &store.select(select_applications), |view, apps| {
                view.applications = apps.clone()
            }),
            bind(&view, &store.select(select_last_error), |view, error| {
                view.last_error = error.clone()
            }),
        ];

        facade.init_subscriptions();

        Self {
            store,
            facade,
            view,
            _view_subscriptions: view_subscriptions,
            mode: Mode::Normal,
            edit_state: EditState::new(),
            status: None,
            should_quit: false,
        }
    }

    pub fn view(&self) -> Ref<'_, HeaderView> {
        self.view.borrow()
    }

    pub fn selected_index(&self) -> Option<usize> {
        let view = self.view.borrow();
        let id = view.selected_id.as_deref()?;
        view.applications.iter().position(|app| app.id == id)
    }

    pub fn can_manage(&self) -> bool {
        self.view
            .borrow()
            .role
            .is_some_and(Role::can_manage_application)
    }

    pub fn reload(&mut self) {
        self.status = None;
        self.store.dispatch(Action::LoadApplications);
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        match self.mode {
            Mode::Help => self.handle_help_mode_key(key_event),
            Mode::Rename => self.handle_rename_mode_key(key_event),
            Mode::ConfirmDelete => self.handle_confirm_delete_key(key_event),
            Mode::Normal => self.handle_normal_mode_key(key_event),
        }
        Ok(())
    }

    fn handle_normal_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_normal_mode_key(key_event) {
            NormalModeAction::Quit => self.quit(),
            NormalModeAction::SelectPrevious => self.select_relative(-1),
            NormalModeAction::SelectNext => self.select_relative(1),
            NormalModeAction::SelectFirst => self.select_index(0),
            NormalModeAction::SelectLast => {
                let len = self.view.borrow().applications.len();
                self.select_index(len.saturating_sub(1));
            }
            NormalModeAction::StartRename => self.start_rename(),
            NormalModeAction::StartDelete => self.start_delete(),
            NormalModeAction::Reload => self.reload(),
            NormalModeAction::ToggleHelpMode => self.mode = Mode::Help,
            NormalModeAction::None => {}
        }
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) {
        if KeyHandler::handle_help_mode_key(key_event) == HelpModeAction::ExitHelpMode {
            self.mode = Mode::Normal;
        }
    }

    fn handle_rename_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_rename_mode_key(key_event) {
            RenameModeAction::Cancel => self.finish_edit(),
            RenameModeAction::Confirm => self.confirm_rename(),
            RenameModeAction::Backspace => self.edit_state.backspace(),
            RenameModeAction::Delete => self.edit_state.delete(),
            RenameModeAction::DeleteWordBackward => self.edit_state.delete_word_backward(),
            RenameModeAction::MoveCursorLeft => self.edit_state.move_cursor_left(),
            RenameModeAction::MoveCursorRight => self.edit_state.move_cursor_right(),
            RenameModeAction::MoveCursorHome => self.edit_state.move_cursor_home(),
            RenameModeAction::MoveCursorEnd => self.edit_state.move_cursor_end(),
            RenameModeAction::InsertChar(c) => self.edit_state.insert_char(c),
            RenameModeAction::None => {}
        }
    }

    fn handle_confirm_delete_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_confirm_delete_key(key_event) {
            ConfirmDeleteAction::Confirm => {
                self.facade.delete();
                self.mode = Mode::Normal;
            }
            ConfirmDeleteAction::Cancel => self.mode = Mode::Normal,
            ConfirmDeleteAction::None => {}
        }
    }

    fn select_relative(&mut self, delta: isize) {
        let len = self.view.borrow().applications.len();
        if len == 0 {
            return;
        }
        let target = match self.selected_index() {
            Some(index) => index.saturating_add_signed(delta).min(len - 1),
            None => 0,
        };
        self.select_index(target);
    }

    fn select_index(&mut self, index: usize) {
        let id = self
            .view
            .borrow()
            .applications
            .get(index)
            .map(|app| app.id.clone());
        if id.is_some() && id != self.view.borrow().selected_id {
            self.status = None;
            self.store.dispatch(Action::SelectApplication { id });
        }
    }

    fn start_rename(&mut self) {
        if !self.can_manage() {
            self.status =
                Some("Only owners and administrators can rename applications".to_string());
            return;
        }
        let current_name = self
            .view
            .borrow()
            .app
            .as_ref()
            .map(|app| app.name.clone())
            .unwrap_or_default();
        self.edit_state.start(&current_name);
        self.mode = Mode::Rename;
    }

    fn confirm_rename(&mut self) {
        self.facade.rename(&self.edit_state.buffer);
        self.finish_edit();
    }

    fn finish_edit(&mut self) {
        self.edit_state.clear();
        self.mode = Mode::Normal;
    }

    fn start_delete(&mut self) {
        if !self.can_manage() {
            self.status =
                Some("Only owners and administrators can delete applications".to_string());
            return;
        }
        self.mode = Mode::ConfirmDelete;
    }

    pub fn quit(&mut self) {
        if self.facade.is_subscribed() {
            self.facade.unsubscribe();
        }
        tracing::debug!(
            remaining_listeners = self.store.state_observer_count(),
            "header facade released"
        );
        self.should_quit = true;
    }
}

fn bind<T: 'static>(
    view: &Rc<RefCell<HeaderView>>,
    stream: &Observable<T>,
    apply: impl Fn(&mut HeaderView, &T) + 'static,
) -> Subscription {
    let view = Rc::clone(view);
    stream.subscribe(move |value| apply(&mut view.borrow_mut(), value))
}
