pub mod edit_booking;
pub mod new_booking;

use crate::{
    error::{not_found_fallback, BookingError, HeadersSnafu},
    form::{submit::SubmitOutcome, BookingForm},
    state::BookingState,
};
use axum::{
    response::{IntoResponse, Response},
    Router,
};
use http::{header::REFRESH, HeaderValue};
use serde::Deserialize;
use snafu::ResultExt;
use tower_http::{services::ServeDir, trace::TraceLayer};

///`?avisos=cerrar` is what the close button on a notification links to.
#[derive(Deserialize, Debug, Default)]
pub struct NoticeQuery {
    pub avisos: Option<String>,
}

impl NoticeQuery {
    pub fn wants_dismissal(&self) -> bool {
        self.avisos.as_deref() == Some("cerrar")
    }
}

///Renders the form after a submission. A successful one also gets a `Refresh` header, so the browser moves on to the bookings view once the notification has been up for the usual delay.
pub async fn respond_after_submit(
    state: &BookingState,
    form: &BookingForm,
    outcome: &SubmitOutcome,
    action: &str,
) -> Result<Response, BookingError> {
    let page = form.render(&state.compiler, action).await?;
    form.teardown();

    if !outcome.succeeded() {
        return Ok(page.into_response());
    }

    let refresh = format!(
        "{}; url={}",
        state.settings.form.follow_up_delay_secs(),
        state.settings.form.bookings_path
    );
    let refresh = HeaderValue::from_str(&refresh).context(HeadersSnafu {
        which_header: REFRESH,
    })?;

    Ok(([(REFRESH, refresh)], page).into_response())
}

pub fn router(state: BookingState) -> Router {
    Router::new()
        .merge(new_booking::router())
        .merge(edit_booking::router())
        .nest_service("/static", ServeDir::new("www/static"))
        .fallback(not_found_fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
