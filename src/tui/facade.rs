use crate::store::actions::Action;
use crate::store::models::{Application, Role};
use crate::store::selectors::{
    select_current_app, select_current_app_id, select_current_user_role,
    select_is_loading_application_list, select_user_role_for_selected_app,
};
use crate::store::store::StateStore;
use crate::store::stream::{combine_latest, Observable, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

/// Lifecycle shared by view facades that mirror store state locally.
pub trait Facade {
    fn init_subscriptions(&mut self);
    fn unsubscribe(&mut self);
}

/// Organization-level elevated roles prevail over the application role; a
/// plain organization `User` keeps whatever the application grants.
pub fn effective_role(application_role: Option<Role>, organization_role: Role) -> Option<Role> {
    if organization_role != Role::User {
        Some(Role::Owner)
    } else {
        application_role
    }
}

pub fn effective_role_stream(
    application_role: &Observable<Option<Role>>,
    organization_role: &Observable<Role>,
) -> Observable<Option<Role>> {
    combine_latest(application_role, organization_role)
        .map(|(application, organization)| effective_role(*application, *organization))
}

/// Header view adapter: exposes the selected application, the effective role
/// and the loading flag, and turns rename/delete intents into store actions
/// against the selected application.
pub struct ApplicationHeaderFacade<S: StateStore> {
    store: Rc<S>,
    app: Observable<Option<Application>>,
    selected_id_stream: Observable<Option<String>>,
    is_loading_app_list: Observable<bool>,
    user_role: Observable<Option<Role>>,
    selected_id: Rc<RefCell<Option<String>>>,
    app_id_subscription: Option<Subscription>,
}

impl<S: StateStore> ApplicationHeaderFacade<S> {
    pub fn new(store: Rc<S>) -> Self {
        let app = store.select(select_current_app);
        let selected_id_stream = store.select(select_current_app_id);
        let is_loading_app_list = store.select(select_is_loading_application_list);
        let user_role = effective_role_stream(
            &store.select(select_user_role_for_selected_app),
            &store.select(select_current_user_role),
        );

        Self {
            store,
            app,
            selected_id_stream,
            is_loading_app_list,
            user_role,
            selected_id: Rc::new(RefCell::new(None)),
            app_id_subscription: None,
        }
    }

    pub fn app_stream(&self) -> Observable<Option<Application>> {
        self.app.clone()
    }

    pub fn selected_id_stream(&self) -> Observable<Option<String>> {
        self.selected_id_stream.clone()
    }

    pub fn loading_stream(&self) -> Observable<bool> {
        self.is_loading_app_list.clone()
    }

    pub fn effective_role_stream(&self) -> Observable<Option<Role>> {
        self.user_role.clone()
    }

    /// Last id seen on the selected-id stream.
    pub fn selected_id(&self) -> Option<String> {
        self.selected_id.borrow().clone()
    }

    pub fn is_subscribed(&self) -> bool {
        self.app_id_subscription.is_some()
    }

    /// No validation here; the store decides what an empty or duplicate name means.
    pub fn rename(&self, name: &str) {
        self.store.dispatch(Action::UpdateApplication {
            id: self.selected_id(),
            name: name.to_string(),
        });
    }

    pub fn delete(&self) {
        self.store.dispatch(Action::DeleteApplication {
            id: self.selected_id(),
        });
    }
}

impl<S: StateStore> Facade for ApplicationHeaderFacade<S> {
    fn init_subscriptions(&mut self) {
        let selected_id = Rc::clone(&self.selected_id);
        let subscription = self
            .selected_id_stream
            .subscribe(move |id| *selected_id.borrow_mut() = id.clone());

        // Replacing drops, and so releases, any earlier subscription.
        if self.app_id_subscription.replace(subscription).is_some() {
            tracing::warn!("init_subscriptions called twice; previous subscription released");
        }
    }

    fn unsubscribe(&mut self) {
        match self.app_id_subscription.take() {
            Some(mut subscription) => subscription.unsubscribe(),
            None => tracing::warn!("unsubscribe called without an active subscription"),
        }
    }
}
