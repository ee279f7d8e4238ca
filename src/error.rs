use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use http::Uri;
use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum ReqwestAction {
    BuildingClient,
    FetchingUser,
    FetchingBonos { user_id: String },
    FetchingEvents,
    CreatingBooking,
    UpdatingBooking { booking_id: String },
    DeletingBooking { booking_id: String },
    ConvertToJson(Box<ReqwestAction>),
}

#[derive(Debug)]
pub enum IOAction {
    ReadingFile(PathBuf),
}

#[derive(Debug)]
pub enum LiquidAction {
    BuildingCompiler,
    Parsing { text: String },
    Rendering,
}

#[derive(Debug)]
pub enum ThreadReason {
    LiquidCompiler,
}

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum BookingError {
    //external errors
    #[snafu(display("Error reqwest-ing: {source:?} whilst trying to {action:?}"))]
    Reqwest {
        source: reqwest::Error,
        action: ReqwestAction,
    },
    #[snafu(display("Backend answered {status} whilst trying to {action:?}: {message:?}"))]
    Backend {
        status: StatusCode,
        message: Option<String>,
        action: ReqwestAction,
    },
    #[snafu(display("Liquid Error: {source:?} caused by {attempt:?}"))]
    Liquid {
        source: liquid::Error,
        attempt: LiquidAction,
    },
    #[snafu(display("IO Error: {source:?} doing {action:?}"))]
    IO {
        source: std::io::Error,
        action: IOAction,
    },
    #[snafu(display("Tokio Join Error: {source:?} which was started to {title:?}"))]
    Join {
        source: tokio::task::JoinError,
        title: ThreadReason,
    },
    #[snafu(display("Error in Headers: {source:?} building {which_header}"))]
    Headers {
        source: http::header::InvalidHeaderValue,
        which_header: http::header::HeaderName,
    },
    #[snafu(display("Backend url {base_url:?} is unusable: {reason}"))]
    BaseUrl { base_url: String, reason: String },
    #[snafu(display("Not able page {was_looking_for:?}"))]
    PageNotFound { was_looking_for: Uri },

    // internal errors
    #[snafu(display("A booking submission is already in flight for this form"))]
    SubmissionInFlight,
}

impl BookingError {
    ///The message a user should see for this failure, if the failure carried one.
    ///
    ///Only the backend ever hands us something fit for display - transport and internal errors return `None` so callers fall back to their own default.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.clone()),
            _ => None,
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn get_error_page(error_code: StatusCode, content: BookingError) -> (StatusCode, Html<String>) {
    error!(?content, ?error_code, "Dealing with Error page: {content:#?}");

    (
        error_code,
        Html(format!(
            include_str!("../www/server_error.html"),
            error = content,
            code = error_code
        )),
    )
}

#[axum::debug_handler]
pub async fn not_found_fallback(uri: Uri) -> (StatusCode, Html<String>) {
    get_error_page(
        StatusCode::NOT_FOUND,
        BookingError::PageNotFound {
            was_looking_for: uri,
        },
    )
}

impl IntoResponse for BookingError {
    fn into_response(self) -> axum::response::Response {
        let code = match &self {
            BookingError::Reqwest { .. } | BookingError::Backend { .. } => StatusCode::BAD_GATEWAY,
            BookingError::PageNotFound { .. } => StatusCode::NOT_FOUND,
            BookingError::SubmissionInFlight => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        get_error_page(code, self).into_response()
    }
}
