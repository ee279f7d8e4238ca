//! Recording stand-in for the backend.

use crate::{
    error::{BookingError, ReqwestAction},
    models::{Booking, BookingSelection, Bono, DeleteResponse, Event, User},
    service::BookingService,
};
use async_trait::async_trait;
use http::StatusCode;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    UserByToken(String),
    BonosByUser(String),
    Events,
    NewBooking(BookingSelection),
    UpdateBooking(String, BookingSelection),
    DeleteBooking(String),
}

///`Err(message)` makes the call fail with a backend rejection carrying that message.
pub type Canned<T> = Result<T, Option<String>>;

pub struct MockService {
    pub user: Canned<User>,
    pub bonos: Canned<Vec<Bono>>,
    pub events: Canned<Vec<Event>>,
    pub booking: Canned<Booking>,
    ///When set, create/update wait for a notification before answering.
    pub gate: Option<Arc<Notify>>,
    pub(crate) calls: Mutex<Vec<Call>>,
}

fn refused(message: Option<String>, action: ReqwestAction) -> BookingError {
    BookingError::Backend {
        status: StatusCode::BAD_REQUEST,
        message,
        action,
    }
}

pub fn user() -> User {
    User {
        id: "u1".into(),
        user_name: "lucia".into(),
        email: "lucia@example.com".into(),
        role: "user".into(),
    }
}

pub fn bono(id: &str, name: &str) -> Bono {
    Bono {
        id: id.into(),
        name: name.into(),
        kind: "10".into(),
        active: true,
        code: format!("C-{id}"),
        user: None,
        total_uses: 10,
        available_uses: 3,
        expiration_date: Some("2026-12-31T00:00:00.000Z".into()),
    }
}

pub fn event(id: &str, name: &str) -> Event {
    Event {
        id: id.into(),
        name: name.into(),
        description: None,
        date: "2026-11-02T18:00:00.000Z".into(),
        hour: 18,
        capacity: Some(12),
    }
}

pub fn booking(id: &str) -> Booking {
    Booking {
        id: id.into(),
        locator: Some("LOC-1".into()),
        events: vec![event("e1", "Yoga")],
        bonos: vec![bono("b1", "Bono 10")],
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self {
            user: Ok(user()),
            bonos: Ok(vec![bono("b1", "Bono 10"), bono("b2", "Bono 5")]),
            events: Ok(vec![event("e1", "Yoga"), event("e2", "Pilates")]),
            booking: Ok(booking("r1")),
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockService {
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl BookingService for MockService {
    async fn get_user_by_token(&self, token: &str) -> Result<User, BookingError> {
        self.record(Call::UserByToken(token.to_string()));
        self.user
            .clone()
            .map_err(|m| refused(m, ReqwestAction::FetchingUser))
    }

    async fn get_bonos_by_user_id(&self, user_id: &str) -> Result<Vec<Bono>, BookingError> {
        self.record(Call::BonosByUser(user_id.to_string()));
        self.bonos.clone().map_err(|m| {
            refused(
                m,
                ReqwestAction::FetchingBonos {
                    user_id: user_id.to_string(),
                },
            )
        })
    }

    async fn get_events(&self) -> Result<Vec<Event>, BookingError> {
        self.record(Call::Events);
        self.events
            .clone()
            .map_err(|m| refused(m, ReqwestAction::FetchingEvents))
    }

    async fn new_booking(&self, selection: &BookingSelection) -> Result<Booking, BookingError> {
        self.record(Call::NewBooking(selection.clone()));
        self.wait_for_gate().await;
        self.booking
            .clone()
            .map_err(|m| refused(m, ReqwestAction::CreatingBooking))
    }

    async fn update_booking(
        &self,
        booking_id: &str,
        selection: &BookingSelection,
    ) -> Result<Booking, BookingError> {
        self.record(Call::UpdateBooking(
            booking_id.to_string(),
            selection.clone(),
        ));
        self.wait_for_gate().await;
        self.booking.clone().map_err(|m| {
            refused(
                m,
                ReqwestAction::UpdatingBooking {
                    booking_id: booking_id.to_string(),
                },
            )
        })
    }

    async fn delete_booking(&self, booking_id: &str) -> Result<DeleteResponse, BookingError> {
        self.record(Call::DeleteBooking(booking_id.to_string()));
        Ok(DeleteResponse { message: None })
    }
}
