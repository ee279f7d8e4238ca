use crate::models::BookingData;

///Whether the form creates a booking or edits one. Decided once, when the form is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { booking_id: String },
}

impl FormMode {
    ///A blank id is treated the same as no id at all.
    pub fn resolve(booking_id: Option<&str>) -> Self {
        match booking_id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::Edit {
                booking_id: id.to_string(),
            },
            _ => Self::Create,
        }
    }

    pub fn booking_id(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Edit { booking_id } => Some(booking_id),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }
}

///Current values of the form's inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub event_id: Option<String>,
    pub bono_id: Option<String>,
    pub locator: Option<String>,
}

impl FormFields {
    ///Fields for `mode`: cleared when creating, taken from `initial` when editing.
    ///
    ///A booking only ever holds one event and one bono, so the first of each becomes the pre-selected option.
    pub fn for_mode(mode: &FormMode, initial: Option<&BookingData>) -> Self {
        match (mode, initial) {
            (FormMode::Edit { .. }, Some(initial)) => Self {
                event_id: initial.events.first().map(|e| e.id.clone()),
                bono_id: initial.bonos.first().map(|b| b.id.clone()),
                locator: initial.locator.clone(),
            },
            _ => Self::default(),
        }
    }
}
