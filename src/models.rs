//! Values exchanged with the bookings backend.
//!
//! Field names on the wire are the backend's own (`_id`, `userName`, `localizador`, ...), so most fields carry a serde rename.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bono {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub active: bool,
    pub code: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub total_uses: u32,
    #[serde(default)]
    pub available_uses: u32,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    pub hour: u32,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "localizador", default)]
    pub locator: Option<String>,
    #[serde(rename = "eventos", default)]
    pub events: Vec<Event>,
    #[serde(rename = "bono", default)]
    pub bonos: Vec<Bono>,
}

///What a host hands the form when it opens it for editing. Everything is optional, the host may know very little about the booking.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingData {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "localizador", default)]
    pub locator: Option<String>,
    #[serde(rename = "eventos", default)]
    pub events: Vec<Event>,
    #[serde(rename = "bono", default)]
    pub bonos: Vec<Bono>,
}

impl From<Booking> for BookingData {
    fn from(
        Booking {
            id,
            locator,
            events,
            bonos,
        }: Booking,
    ) -> Self {
        Self {
            id: Some(id),
            locator,
            events,
            bonos,
        }
    }
}

///The validated pair every create and update carries.
///
///Only built by [`crate::form::validation::validate`], so holding one means both ids are present and non-blank.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSelection {
    pub(crate) event_id: String,
    pub(crate) bono_id: String,
}

impl BookingSelection {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn bono_id(&self) -> &str {
        &self.bono_id
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: Option<String>,
}
