//! The page that books a new event against one of the user's bonos.
//!
//! `GET` mounts the form and shows it, `POST` mounts it again, submits the posted choice and shows the result.

use crate::{
    error::BookingError,
    form::{validation::RawSelection, BookingForm, FormHost},
    routes::{respond_after_submit, NoticeQuery},
    state::BookingState,
};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::{cookie::CookieJar, Form};

pub const LOCATION: &str = "/reservas/nueva";

///`GET` method for the new booking form
#[axum::debug_handler]
async fn get_new_booking(
    State(state): State<BookingState>,
    jar: CookieJar,
    Query(notices): Query<NoticeQuery>,
) -> Result<impl IntoResponse, BookingError> {
    let form = BookingForm::mount(state.form_services(&jar), FormHost::default()).await;
    if notices.wants_dismissal() {
        form.dismiss_notifications();
    }

    form.render(&state.compiler, LOCATION).await
}

///`POST` method that creates the booking
#[axum::debug_handler]
async fn post_new_booking(
    State(state): State<BookingState>,
    jar: CookieJar,
    Form(raw): Form<RawSelection>,
) -> Result<Response, BookingError> {
    let form = BookingForm::mount(state.form_services(&jar), FormHost::default()).await;
    let outcome = form.submit(raw).await?;

    respond_after_submit(&state, &form, &outcome, LOCATION).await
}

pub fn router() -> Router<BookingState> {
    Router::new().route(LOCATION, get(get_new_booking).post(post_new_booking))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        form::submit::{BOOKING_CREATED, CREATE_FAILED},
        models::BookingSelection,
        routes::tests::spawn,
        service::mock::{Call, MockService},
    };
    use http::header::{COOKIE, REFRESH};

    #[tokio::test]
    async fn logged_in_user_sees_their_bonos() {
        let server = spawn(MockService::default()).await;

        let response = server
            .client
            .get(format!("{}{LOCATION}", server.base))
            .header(COOKIE, "token=tok")
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let page = response.text().await.expect("body");
        assert!(page.contains("Te has identificado como lucia."));
        assert!(page.contains("Bono 10 - Código: C-b1"));
        assert!(page.contains("<span>New</span> Booking"));
        assert_eq!(
            server.service.calls(),
            vec![
                Call::UserByToken("tok".into()),
                Call::BonosByUser("u1".into()),
                Call::Events
            ]
        );
    }

    #[tokio::test]
    async fn posting_a_choice_creates_and_refreshes() {
        let server = spawn(MockService::default()).await;

        let response = server
            .client
            .post(format!("{}{LOCATION}", server.base))
            .header(COOKIE, "token=tok")
            .form(&[("eventId", "e2"), ("bonoId", "b1")])
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(REFRESH)
                .and_then(|v| v.to_str().ok()),
            Some("2; url=/gestion-reservas")
        );
        assert!(response.text().await.expect("body").contains(BOOKING_CREATED));
        assert_eq!(
            server.service.count(|c| matches!(
                c,
                Call::NewBooking(s) if *s == BookingSelection { event_id: "e2".into(), bono_id: "b1".into() }
            )),
            1
        );
    }

    #[tokio::test]
    async fn failed_booking_stays_on_the_page() {
        let server = spawn(MockService {
            booking: Err(None),
            ..MockService::default()
        })
        .await;

        let response = server
            .client
            .post(format!("{}{LOCATION}", server.base))
            .header(COOKIE, "token=tok")
            .form(&[("eventId", "e1"), ("bonoId", "b1")])
            .send()
            .await
            .expect("request");

        assert!(response.headers().get(REFRESH).is_none());
        assert!(response.text().await.expect("body").contains(CREATE_FAILED));
    }

    #[tokio::test]
    async fn missing_event_is_flagged_inline() {
        let server = spawn(MockService::default()).await;

        let page = server
            .client
            .post(format!("{}{LOCATION}", server.base))
            .header(COOKIE, "token=tok")
            .form(&[("bonoId", "b1")])
            .send()
            .await
            .expect("request")
            .text()
            .await
            .expect("body");

        assert!(page.contains("Selecciona un evento antes de continuar"));
        assert_eq!(
            server.service.count(|c| matches!(c, Call::NewBooking(_))),
            0
        );
    }

    #[tokio::test]
    async fn closing_notices_clears_load_errors() {
        let server = spawn(MockService {
            bonos: Ok(vec![]),
            ..MockService::default()
        })
        .await;

        let with_notice = server
            .client
            .get(format!("{}{LOCATION}", server.base))
            .header(COOKIE, "token=tok")
            .send()
            .await
            .expect("request")
            .text()
            .await
            .expect("body");
        assert!(with_notice.contains("No tienes ningún bono disponible"));

        let dismissed = server
            .client
            .get(format!("{}{LOCATION}?avisos=cerrar", server.base))
            .header(COOKIE, "token=tok")
            .send()
            .await
            .expect("request")
            .text()
            .await
            .expect("body");
        assert!(!dismissed.contains("No tienes ningún bono disponible"));
    }
}
