use super::{
    follow_up::FollowUp,
    mode::FormMode,
    validation::{validate, FieldErrors, RawSelection, MISSING_BONO},
    BookingForm,
};
use crate::{
    error::BookingError,
    models::{Booking, BookingSelection},
};
use std::sync::atomic::Ordering;

pub const BOOKING_UPDATED: &str = "Reserva actualizada correctamente";
pub const BOOKING_CREATED: &str = "Reserva creada correctamente";
pub const UPDATE_FAILED: &str = "Error al actualizar la reserva";
pub const CREATE_FAILED: &str = "Error al crear la reserva";
pub const SELECT_A_BONO: &str = "Por favor, selecciona un bono antes de continuar.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    ///Nothing was sent - the inline errors say why.
    Invalid(FieldErrors),
    Created(Booking),
    Updated(Booking),
    ///The backend refused or could not be reached. Holds the message shown to the user.
    Failed(String),
}

impl SubmitOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Updated(_))
    }
}

///Marks a submission as in flight for as long as it lives, and clears the loading flag however the submission ends.
struct InFlight<'a>(&'a BookingForm);

impl<'a> InFlight<'a> {
    fn acquire(form: &'a BookingForm) -> Option<Self> {
        form.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        form.state().loading = true;
        Some(Self(form))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.state().loading = false;
        self.0.in_flight.store(false, Ordering::Release);
    }
}

impl BookingForm {
    ///Validates `raw` and, if both an event and a bono were picked, creates or updates the booking.
    ///
    ///Errors only when another submission from this form is still running - that one is left alone and nothing else changes.
    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn submit(&self, raw: RawSelection) -> Result<SubmitOutcome, BookingError> {
        let Some(_in_flight) = InFlight::acquire(self) else {
            warn!("Rejecting submission, one is already in flight");
            return Err(BookingError::SubmissionInFlight);
        };

        debug!(?raw, "Booking form data");

        let selection = {
            let mut state = self.state();
            state.fields.event_id.clone_from(&raw.event_id);
            state.fields.bono_id.clone_from(&raw.bono_id);

            match validate(&raw) {
                Ok(selection) => {
                    state.field_errors = FieldErrors::default();
                    selection
                }
                Err(field_errors) => {
                    debug!(?field_errors, "Selection incomplete");
                    state.field_errors = field_errors.clone();
                    return Ok(SubmitOutcome::Invalid(field_errors));
                }
            }
        };

        if selection.bono_id().trim().is_empty() {
            error!("No bono selected");
            self.state().error = Some(SELECT_A_BONO.to_string());
            return Ok(SubmitOutcome::Invalid(FieldErrors {
                event: None,
                bono: Some(MISSING_BONO),
            }));
        }

        Ok(match &self.mode {
            FormMode::Edit { booking_id } => self.send_update(booking_id, &selection).await,
            FormMode::Create => self.send_create(&selection).await,
        })
    }

    async fn send_update(&self, booking_id: &str, selection: &BookingSelection) -> SubmitOutcome {
        match self
            .services
            .service
            .update_booking(booking_id, selection)
            .await
        {
            Ok(booking) => {
                info!(?booking_id, "Booking updated");
                self.state().notification = Some(BOOKING_UPDATED.to_string());
                if let Some(on_close) = &self.on_close {
                    self.follow_ups.schedule(FollowUp::Close(on_close.clone()));
                }
                SubmitOutcome::Updated(booking)
            }
            Err(e) => self.fail(&e, UPDATE_FAILED),
        }
    }

    async fn send_create(&self, selection: &BookingSelection) -> SubmitOutcome {
        match self.services.service.new_booking(selection).await {
            Ok(booking) => {
                info!(booking_id = ?booking.id, "Booking created");
                self.state().notification = Some(BOOKING_CREATED.to_string());
                self.follow_ups.schedule(FollowUp::Navigate {
                    navigator: self.services.navigator.clone(),
                    path: self.services.settings.bookings_path.clone(),
                });
                SubmitOutcome::Created(booking)
            }
            Err(e) => self.fail(&e, CREATE_FAILED),
        }
    }

    fn fail(&self, e: &BookingError, default_message: &str) -> SubmitOutcome {
        error!(?e, "Error submitting booking");
        let message = e
            .user_message()
            .unwrap_or_else(|| default_message.to_string());
        self.state().error = Some(message.clone());
        SubmitOutcome::Failed(message)
    }
}
