use crate::models::BookingSelection;
use serde::{Deserialize, Serialize};

pub const MISSING_EVENT: &str = "Selecciona un evento antes de continuar";
pub const MISSING_BONO: &str = "Debes seleccionar un bono";

///Form values as posted - either radio group may have been left untouched.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawSelection {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub bono_id: Option<String>,
}

impl RawSelection {
    pub fn new(event_id: Option<&str>, bono_id: Option<&str>) -> Self {
        Self {
            event_id: event_id.map(ToString::to_string),
            bono_id: bono_id.map(ToString::to_string),
        }
    }
}

///Inline messages for each radio group.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub event: Option<&'static str>,
    pub bono: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.event.is_none() && self.bono.is_none()
    }
}

fn present(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

///Both groups are required. Either everything needed for a booking comes back, or the message for every group that is missing.
pub fn validate(raw: &RawSelection) -> Result<BookingSelection, FieldErrors> {
    let event_id = present(raw.event_id.as_ref());
    let bono_id = present(raw.bono_id.as_ref());

    match (event_id, bono_id) {
        (Some(event_id), Some(bono_id)) => Ok(BookingSelection { event_id, bono_id }),
        (event_id, bono_id) => Err(FieldErrors {
            event: event_id.is_none().then_some(MISSING_EVENT),
            bono: bono_id.is_none().then_some(MISSING_BONO),
        }),
    }
}
