//! Editing an existing booking.
//!
//! Whoever links here (the bookings list) passes what it knows about the booking in the query string. Once the form has loaded its options those ids are matched against them to pre-select the current event and bono.

use crate::{
    error::BookingError,
    form::{validation::RawSelection, BookingForm, FormHost},
    models::BookingData,
    routes::{respond_after_submit, NoticeQuery},
    state::BookingState,
};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::{cookie::CookieJar, Form};
use serde::Deserialize;

pub const LOCATION: &str = "/reservas/:id/editar";

fn location(id: &str) -> String {
    LOCATION.replace(":id", id)
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct EditQuery {
    localizador: Option<String>,
    event_id: Option<String>,
    bono_id: Option<String>,
    #[serde(flatten)]
    notices: NoticeQuery,
}

///The posted choice, plus the locator the page carried along in a hidden field.
#[derive(Deserialize, Debug)]
struct EditSubmission {
    localizador: Option<String>,
    #[serde(flatten)]
    selection: RawSelection,
}

impl EditQuery {
    ///Builds the initial data from whichever of the given ids the form actually loaded.
    fn initial_data(&self, id: &str, form: &BookingForm) -> BookingData {
        let loaded = form.snapshot();

        BookingData {
            id: Some(id.to_string()),
            locator: self.localizador.clone(),
            events: loaded
                .events
                .into_iter()
                .filter(|e| self.event_id.as_deref() == Some(e.id.as_str()))
                .collect(),
            bonos: loaded
                .bonos
                .unwrap_or_default()
                .into_iter()
                .filter(|b| self.bono_id.as_deref() == Some(b.id.as_str()))
                .collect(),
        }
    }
}

fn host(id: &str) -> FormHost {
    FormHost {
        booking_id: Some(id.to_string()),
        ..FormHost::default()
    }
}

///`GET` method for the edit form
#[axum::debug_handler]
async fn get_edit_booking(
    State(state): State<BookingState>,
    Path(id): Path<String>,
    jar: CookieJar,
    Query(query): Query<EditQuery>,
) -> Result<impl IntoResponse, BookingError> {
    let form = BookingForm::mount(state.form_services(&jar), host(&id)).await;
    form.replace_initial_data(Some(&query.initial_data(&id, &form)));
    if query.notices.wants_dismissal() {
        form.dismiss_notifications();
    }

    form.render(&state.compiler, &location(&id)).await
}

///`POST` method that updates the booking
#[axum::debug_handler]
async fn post_edit_booking(
    State(state): State<BookingState>,
    Path(id): Path<String>,
    jar: CookieJar,
    Form(EditSubmission {
        localizador,
        selection,
    }): Form<EditSubmission>,
) -> Result<Response, BookingError> {
    let form = BookingForm::mount(state.form_services(&jar), host(&id)).await;
    form.replace_initial_data(Some(&BookingData {
        id: Some(id.clone()),
        locator: localizador,
        ..BookingData::default()
    }));
    let outcome = form.submit(selection).await?;

    respond_after_submit(&state, &form, &outcome, &location(&id)).await
}

pub fn router() -> Router<BookingState> {
    Router::new().route(LOCATION, get(get_edit_booking).post(post_edit_booking))
}
