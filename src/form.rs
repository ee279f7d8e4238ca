//! The booking form: loads what a user needs to book, validates their choice and sends it to the backend.
//!
//! A [`BookingForm`] lives as long as one mounted form. It owns:
//! - the transient UI state (user, bonos, events, field values, messages)
//! - the single-flight guard for submissions
//! - the delayed follow-ups a successful submission schedules, cancelled when the form goes away.

use crate::{
    cfg::FormSettings,
    credentials::CredentialProvider,
    models::{BookingData, Bono, Event, User},
    service::BookingService,
};
use std::sync::{atomic::AtomicBool, Arc, Mutex, MutexGuard, PoisonError};

pub mod follow_up;
pub mod loader;
pub mod mode;
pub mod submit;
pub mod validation;
pub mod view;

use follow_up::{FollowUps, Navigator, OnClose};
use mode::{FormFields, FormMode};
use validation::FieldErrors;

///Everything the form talks to, injected by whoever mounts it.
#[derive(Clone)]
pub struct FormServices {
    pub service: Arc<dyn BookingService>,
    pub credentials: Arc<dyn CredentialProvider>,
    pub navigator: Arc<dyn Navigator>,
    pub settings: FormSettings,
}

///What the host (a page, or a booking card's modal) passes in.
#[derive(Clone, Default)]
pub struct FormHost {
    pub booking_id: Option<String>,
    pub initial_data: Option<BookingData>,
    pub on_close: Option<OnClose>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub user: Option<User>,
    ///`None` until a bono lookup has succeeded for the current user.
    pub bonos: Option<Vec<Bono>>,
    pub events: Vec<Event>,
    pub fields: FormFields,
    pub field_errors: FieldErrors,
    pub notification: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

pub struct BookingForm {
    services: FormServices,
    mode: FormMode,
    on_close: Option<OnClose>,
    state: Mutex<FormState>,
    in_flight: AtomicBool,
    follow_ups: FollowUps,
}

impl BookingForm {
    pub fn new(services: FormServices, host: FormHost) -> Self {
        let mode = FormMode::resolve(host.booking_id.as_deref());
        let fields = FormFields::for_mode(&mode, host.initial_data.as_ref());
        let follow_ups = FollowUps::new(services.settings.follow_up_delay());

        debug!(?mode, "Mounting booking form");

        Self {
            services,
            mode,
            on_close: host.on_close,
            state: Mutex::new(FormState {
                fields,
                ..FormState::default()
            }),
            in_flight: AtomicBool::new(false),
            follow_ups,
        }
    }

    ///Builds the form and runs the load pipeline, like a page does when it first shows the form.
    pub async fn mount(services: FormServices, host: FormHost) -> Self {
        let form = Self::new(services, host);
        form.load().await;
        form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn snapshot(&self) -> FormState {
        self.state().clone()
    }

    ///The host handed over different initial data - reset the fields from it. The mode stays what it was at mount.
    pub fn replace_initial_data(&self, initial_data: Option<&BookingData>) {
        let fields = FormFields::for_mode(&self.mode, initial_data);
        let mut state = self.state();
        state.fields = fields;
        state.field_errors = FieldErrors::default();
    }

    ///Clears both the error and the success message. Returns whether there was anything to clear.
    pub fn dismiss_notifications(&self) -> bool {
        let mut state = self.state();
        let had_any = state.error.is_some() || state.notification.is_some();
        state.error = None;
        state.notification = None;
        had_any
    }

    ///Cancels any navigation or close callback still waiting to run.
    pub fn teardown(&self) {
        if !self.follow_ups.is_cancelled() {
            debug!(mode = ?self.mode, "Tearing down booking form");
        }
        self.follow_ups.cancel_all();
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
