//! What a page needs to draw the form, flattened out of [`FormState`] so the template does no thinking.

use super::{mode::FormMode, BookingForm, FormState};
use crate::{
    error::{BookingError, LiquidAction, LiquidSnafu},
    liquid_utils::CustomFormat,
    models::{Bono, Event},
    state::compiler::BookingCompiler,
};
use axum::response::Html;
use liquid::{model::Value, Object};
use serde::Serialize;
use snafu::ResultExt;

pub const TEMPLATE: &str = "www/booking_form.liquid";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BonoCard {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub active: bool,
    pub code: String,
    pub total_uses: u32,
    pub available_uses: u32,
    pub expiration_date: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EventOption {
    pub id: String,
    pub name: String,
    pub date: String,
    pub checked: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BonoOption {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

///A query value the page passes along when it reloads itself, so an edit keeps its locator and choice.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CarriedField {
    pub name: &'static str,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub locator: Option<String>,
    pub greeting: Option<String>,
    pub bonos_loaded: bool,
    pub bono_cards: Vec<BonoCard>,
    pub events: Vec<EventOption>,
    pub bonos: Vec<BonoOption>,
    pub event_error: Option<&'static str>,
    pub bono_error: Option<&'static str>,
    pub notification: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
    pub action: String,
    pub carried: Vec<CarriedField>,
}

fn carried(mode: &FormMode, state: &FormState) -> Vec<CarriedField> {
    if !mode.is_edit() {
        return vec![];
    }

    let fields = &state.fields;
    [
        ("localizador", &fields.locator),
        ("eventId", &fields.event_id),
        ("bonoId", &fields.bono_id),
    ]
    .into_iter()
    .filter_map(|(name, value)| {
        value.clone().map(|value| CarriedField { name, value })
    })
    .collect()
}

fn is_checked(selected: Option<&String>, id: &str) -> bool {
    selected.is_some_and(|s| s == id)
}

impl FormView {
    pub fn new(mode: &FormMode, state: &FormState, date_format: &str, action: &str) -> Self {
        let bono_cards = state
            .bonos
            .iter()
            .flatten()
            .map(
                |Bono {
                     id,
                     name,
                     kind,
                     active,
                     code,
                     total_uses,
                     available_uses,
                     expiration_date,
                     ..
                 }| BonoCard {
                    id: id.clone(),
                    name: name.clone(),
                    kind: kind.clone(),
                    active: *active,
                    code: code.clone(),
                    total_uses: *total_uses,
                    available_uses: *available_uses,
                    expiration_date: expiration_date
                        .as_deref()
                        .map(|d| d.to_env_string(date_format)),
                },
            )
            .collect();

        let events = state
            .events
            .iter()
            .map(|Event { id, name, date, .. }| EventOption {
                id: id.clone(),
                name: name.clone(),
                date: date.to_env_string(date_format),
                checked: is_checked(state.fields.event_id.as_ref(), id),
            })
            .collect();

        let bonos = state
            .bonos
            .iter()
            .flatten()
            .map(|b| BonoOption {
                id: b.id.clone(),
                label: format!("{} - Código: {}", b.name, b.code),
                checked: is_checked(state.fields.bono_id.as_ref(), &b.id),
            })
            .collect();

        Self {
            title: if mode.is_edit() { "Update" } else { "New" },
            locator: state.fields.locator.clone(),
            greeting: state.user.as_ref().map(|u| {
                format!(
                    "Te has identificado como {}. Estos son tus bonos:",
                    u.user_name
                )
            }),
            bonos_loaded: state.bonos.is_some(),
            bono_cards,
            events,
            bonos,
            event_error: state.field_errors.event,
            bono_error: state.field_errors.bono,
            notification: state.notification.clone(),
            error: state.error.clone(),
            loading: state.loading,
            action: action.to_string(),
            carried: carried(mode, state),
        }
    }
}

impl BookingForm {
    pub fn view(&self, action: &str) -> FormView {
        FormView::new(
            &self.mode,
            &self.snapshot(),
            &self.services.settings.date_format,
            action,
        )
    }

    pub async fn render(
        &self,
        compiler: &BookingCompiler,
        action: &str,
    ) -> Result<Html<String>, BookingError> {
        let view = self.view(action);
        let form = liquid::to_object(&view).context(LiquidSnafu {
            attempt: LiquidAction::Rendering,
        })?;
        let mut globals = Object::new();
        globals.insert("form".into(), Value::Object(form));

        compiler
            .compile_with_newtitle(
                TEMPLATE,
                globals,
                Some(format!("{} Booking", view.title)),
            )
            .await
    }
}
