//! The bookings backend as the form sees it.

use crate::{
    error::BookingError,
    models::{Booking, BookingSelection, Bono, DeleteResponse, Event, User},
};
use async_trait::async_trait;

#[cfg(test)]
pub mod mock;
pub mod rest;

pub use rest::RestBookingService;

#[async_trait]
pub trait BookingService: Send + Sync {
    async fn get_user_by_token(&self, token: &str) -> Result<User, BookingError>;

    ///May well be empty - a user without bonos is not an error here.
    async fn get_bonos_by_user_id(&self, user_id: &str) -> Result<Vec<Bono>, BookingError>;

    async fn get_events(&self) -> Result<Vec<Event>, BookingError>;

    ///Fails when the backend refuses the booking (eg. the bono has no uses left), which is not checked client-side.
    async fn new_booking(&self, selection: &BookingSelection) -> Result<Booking, BookingError>;

    async fn update_booking(
        &self,
        booking_id: &str,
        selection: &BookingSelection,
    ) -> Result<Booking, BookingError>;

    async fn delete_booking(&self, booking_id: &str) -> Result<DeleteResponse, BookingError>;
}
