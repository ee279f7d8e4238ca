use crate::{
    cfg::ApiSettings,
    error::{BookingError, ReqwestAction, ReqwestSnafu},
    models::{Booking, BookingSelection, Bono, DeleteResponse, Event, User},
    service::BookingService,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize};
use snafu::ResultExt;
use std::time::Duration;

///Body the backend sends alongside a non-2xx status.
#[derive(Deserialize, Debug)]
struct BackendFailure {
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct RestBookingService {
    client: Client,
    base_url: Url,
}

impl RestBookingService {
    pub fn new(settings: &ApiSettings) -> Result<Self, BookingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context(ReqwestSnafu {
                action: ReqwestAction::BuildingClient,
            })?;

        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| e.to_string())
            .and_then(|url| {
                if url.cannot_be_a_base() {
                    Err("not a base url".to_string())
                } else {
                    Ok(url)
                }
            })
            .map_err(|reason| BookingError::BaseUrl {
                base_url: settings.base_url.clone(),
                reason,
            })?;

        Ok(Self { client, base_url })
    }

    ///Each segment is percent-encoded on its own, so ids can't add path segments or a query.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
        action: ReqwestAction,
    ) -> Result<T, BookingError> {
        let response = request.send().await.context(ReqwestSnafu {
            action: action.clone(),
        })?;

        let status = response.status();
        if !status.is_success() {
            //an unreadable body just means there is no message to show
            let message = response
                .json::<BackendFailure>()
                .await
                .ok()
                .and_then(|f| f.message);

            warn!(?status, ?message, ?action, "Backend refused request");
            return Err(BookingError::Backend {
                status,
                message,
                action,
            });
        }

        response.json::<T>().await.context(ReqwestSnafu {
            action: ReqwestAction::ConvertToJson(Box::new(action)),
        })
    }
}

#[async_trait]
impl BookingService for RestBookingService {
    #[instrument(skip_all)]
    async fn get_user_by_token(&self, token: &str) -> Result<User, BookingError> {
        Self::send(
            self.client.get(self.url(&["users", "token"])).bearer_auth(token),
            ReqwestAction::FetchingUser,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_bonos_by_user_id(&self, user_id: &str) -> Result<Vec<Bono>, BookingError> {
        Self::send(
            self.client.get(self.url(&["bonos", "user", user_id])),
            ReqwestAction::FetchingBonos {
                user_id: user_id.to_string(),
            },
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_events(&self) -> Result<Vec<Event>, BookingError> {
        Self::send(
            self.client.get(self.url(&["events"])),
            ReqwestAction::FetchingEvents,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn new_booking(&self, selection: &BookingSelection) -> Result<Booking, BookingError> {
        Self::send(
            self.client.post(self.url(&["bookings"])).json(selection),
            ReqwestAction::CreatingBooking,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn update_booking(
        &self,
        booking_id: &str,
        selection: &BookingSelection,
    ) -> Result<Booking, BookingError> {
        Self::send(
            self.client
                .put(self.url(&["bookings", booking_id]))
                .json(selection),
            ReqwestAction::UpdatingBooking {
                booking_id: booking_id.to_string(),
            },
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_booking(&self, booking_id: &str) -> Result<DeleteResponse, BookingError> {
        Self::send(
            self.client.delete(self.url(&["bookings", booking_id])),
            ReqwestAction::DeletingBooking {
                booking_id: booking_id.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::{get, post, put},
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn get_user(headers: HeaderMap) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
        match headers.get("authorization").and_then(|h| h.to_str().ok()) {
            Some("Bearer good-token") => Ok(Json(json!({
                "_id": "u1",
                "userName": "lucia",
                "email": "lucia@example.com",
                "rol": "user"
            }))),
            _ => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Token inválido" })),
            )),
        }
    }

    async fn get_bonos(Path(user_id): Path<String>) -> Json<Value> {
        Json(json!([{
            "_id": "b1",
            "name": format!("Bono de {user_id}"),
            "type": "5",
            "active": true,
            "code": "ABC",
            "totalUses": 5,
            "availableUses": 5
        }]))
    }

    async fn get_events() -> Json<Value> {
        Json(json!([{ "_id": "e1", "name": "Yoga", "date": "2026-11-02", "hour": 18 }]))
    }

    async fn post_booking(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["bonoId"] == "empty" {
            return (
                StatusCode::CONFLICT,
                Json(json!({ "message": "El bono no tiene usos disponibles" })),
            );
        }

        (
            StatusCode::CREATED,
            Json(json!({
                "_id": "r1",
                "localizador": format!("{}-{}", body["eventId"].as_str().unwrap_or_default(), body["bonoId"].as_str().unwrap_or_default()),
            })),
        )
    }

    async fn put_booking(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
        Json(json!({ "_id": id, "localizador": body["eventId"] }))
    }

    async fn delete_booking(Path(id): Path<String>) -> (StatusCode, String) {
        if id == "missing" {
            return (StatusCode::NOT_FOUND, "not json at all".to_string());
        }

        (StatusCode::OK, json!({ "message": "Reserva eliminada" }).to_string())
    }

    async fn spawn_backend() -> RestBookingService {
        let app = Router::new()
            .route("/api/users/token", get(get_user))
            .route("/api/bonos/user/:id", get(get_bonos))
            .route("/api/events", get(get_events))
            .route("/api/bookings", post(post_booking))
            .route("/api/bookings/:id", put(put_booking).delete(delete_booking));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test backend");
        });

        RestBookingService::new(&ApiSettings {
            base_url: format!("http://{addr}/api/"),
            timeout_secs: 5,
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn reads_user_bonos_and_events() {
        let service = spawn_backend().await;

        let user = service
            .get_user_by_token("good-token")
            .await
            .expect("user resolves");
        assert_eq!(user.user_name, "lucia");

        let bonos = service.get_bonos_by_user_id(&user.id).await.expect("bonos");
        assert_eq!(bonos.len(), 1);
        assert_eq!(bonos[0].name, "Bono de u1");

        let events = service.get_events().await.expect("events");
        assert_eq!(events[0].name, "Yoga");
        assert_eq!(events[0].capacity, None);
    }

    #[tokio::test]
    async fn rejected_token_carries_backend_message() {
        let service = spawn_backend().await;

        let error = service
            .get_user_by_token("expired")
            .await
            .expect_err("token is refused");

        assert!(matches!(
            error,
            BookingError::Backend {
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        ));
        assert_eq!(error.user_message().as_deref(), Some("Token inválido"));
    }

    #[tokio::test]
    async fn creates_and_updates_bookings() {
        let service = spawn_backend().await;
        let selection = BookingSelection {
            event_id: "e1".into(),
            bono_id: "b1".into(),
        };

        let created = service.new_booking(&selection).await.expect("created");
        assert_eq!(created.id, "r1");
        assert_eq!(created.locator.as_deref(), Some("e1-b1"));

        let updated = service
            .update_booking("r9", &selection)
            .await
            .expect("updated");
        assert_eq!(updated.id, "r9");
        assert_eq!(updated.locator.as_deref(), Some("e1"));
    }

    #[tokio::test]
    async fn refused_booking_is_explained() {
        let service = spawn_backend().await;
        let selection = BookingSelection {
            event_id: "e1".into(),
            bono_id: "empty".into(),
        };

        let error = service
            .new_booking(&selection)
            .await
            .expect_err("backend refuses");
        assert_eq!(
            error.user_message().as_deref(),
            Some("El bono no tiene usos disponibles")
        );
    }

    #[tokio::test]
    async fn delete_reports_message_or_bare_status() {
        let service = spawn_backend().await;

        let deleted = service.delete_booking("r1").await.expect("deleted");
        assert_eq!(deleted.message.as_deref(), Some("Reserva eliminada"));

        let error = service
            .delete_booking("missing")
            .await
            .expect_err("not found");
        assert!(matches!(
            error,
            BookingError::Backend {
                status: StatusCode::NOT_FOUND,
                message: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn ids_stay_inside_their_segment() {
        let service = spawn_backend().await;
        let selection = BookingSelection {
            event_id: "e1".into(),
            bono_id: "b1".into(),
        };

        let escaped = service
            .update_booking("../users/u2", &selection)
            .await
            .expect("still a booking update");
        assert_eq!(escaped.id, "../users/u2");

        let queried = service
            .update_booking("r1?admin=1", &selection)
            .await
            .expect("still a booking update");
        assert_eq!(queried.id, "r1?admin=1");

        let url = service.url(&["bookings", "r1?admin=1"]);
        assert_eq!(url.path(), "/api/bookings/r1%3Fadmin=1");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn base_url_must_be_absolute() {
        let error = RestBookingService::new(&ApiSettings {
            base_url: "api/".into(),
            timeout_secs: 5,
        })
        .expect_err("relative url");

        assert!(matches!(error, BookingError::BaseUrl { .. }));
    }
}
