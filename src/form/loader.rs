//! Loads the user, their bonos and the events before the form is usable.
//!
//! The bono lookup needs the user's id, so the steps run in order: user, bonos for that user, events.
//! A step that fails leaves its message behind and any step depending on it is skipped; events load regardless.

use super::BookingForm;
use crate::models::User;

pub const USER_LOOKUP_FAILED: &str = "No se pudo obtener la información del usuario.";
pub const NO_BONOS: &str = "No tienes ningún bono disponible para realizar una reserva.";
pub const BONOS_LOOKUP_FAILED: &str =
    "Hubo un problema al obtener los bonos del usuario. Por favor, intenta de nuevo.";
pub const EVENTS_LOOKUP_FAILED: &str = "Error fetching events";

impl BookingForm {
    #[instrument(skip(self))]
    pub async fn load(&self) {
        if let Some(user) = self.load_user().await {
            self.load_bonos(&user).await;
        }
        self.load_events().await;
    }

    ///No token means nobody is logged in - that is not an error, there is just no user.
    pub async fn load_user(&self) -> Option<User> {
        let token = self.services.credentials.token()?;

        match self.services.service.get_user_by_token(&token).await {
            Ok(user) => {
                info!(user_name = %user.user_name, "Identified user");
                self.state().user = Some(user.clone());
                Some(user)
            }
            Err(e) => {
                error!(?e, "Error getting user data");
                self.state().error = Some(USER_LOOKUP_FAILED.to_string());
                None
            }
        }
    }

    pub async fn load_bonos(&self, user: &User) {
        if user.id.trim().is_empty() {
            warn!(?user, "User has no id, skipping bono lookup");
            return;
        }

        match self.services.service.get_bonos_by_user_id(&user.id).await {
            Ok(bonos) => {
                debug!(n_bonos = bonos.len(), "Got bonos for user");
                let mut state = self.state();
                if bonos.is_empty() {
                    state.error = Some(NO_BONOS.to_string());
                }
                state.bonos = Some(bonos);
            }
            Err(e) => {
                error!(?e, user_id = %user.id, "Error fetching bonos");
                self.state().error = Some(BONOS_LOOKUP_FAILED.to_string());
            }
        }
    }

    pub async fn load_events(&self) {
        match self.services.service.get_events().await {
            Ok(events) => {
                debug!(n_events = events.len(), "Got events");
                self.state().events = events;
            }
            Err(e) => {
                error!(?e, "Error fetching events");
                self.state().error =
                    Some(e.user_message().unwrap_or_else(|| EVENTS_LOOKUP_FAILED.to_string()));
            }
        }
    }
}
