use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};
use url::form_urlencoded;

use crate::api::{ApiError, EventApi};
use crate::types::{BookingForm, BookingId, BookingRequest, BookingResult};

pub const SUBMIT_LABEL: &str = "Submit Booking";
pub const SUBMITTING_LABEL: &str = "Submitting…";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The backend answered `success: false`.
    #[error("booking rejected by server")]
    Rejected,
    /// A submission is in flight or the page has already left.
    #[error("booking form is not accepting submissions")]
    NotIdle,
}

impl BookingError {
    /// Text of the one notification shown for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            BookingError::Rejected => "Something went wrong. Try again.",
            BookingError::Api(_) => "Server error. Please try later.",
            BookingError::NotIdle => "Your booking is already being submitted.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    /// Terminal: navigation to the confirmation page has been handed out.
    Redirected,
}

/// What the submit button looks like right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl SubmitPhase {
    pub fn control(self) -> SubmitControl {
        match self {
            SubmitPhase::Idle => SubmitControl { enabled: true, label: SUBMIT_LABEL },
            SubmitPhase::Submitting | SubmitPhase::Redirected => SubmitControl { enabled: false, label: SUBMITTING_LABEL },
        }
    }
}

/// UI side of the booking form.
pub trait BookingView {
    fn render(&mut self, control: SubmitControl);
    /// Blocking, must-acknowledge message.
    fn notify(&mut self, message: &str);
    fn navigate(&mut self, location: &str);
}

/// Where the page goes after a successful booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub page: String,
    pub booking_id: Option<BookingId>,
    api_base: String,
}

impl Confirmation {
    pub fn new(page: impl Into<String>, booking_id: Option<BookingId>, api_base: impl Into<String>) -> Self {
        Self { page: page.into(), booking_id, api_base: api_base.into() }
    }

    /// `page?booking_id=<id>`, or just `page` without an id.
    pub fn location(&self) -> String {
        match &self.booking_id {
            None => self.page.clone(),
            Some(id) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("booking_id", &id.to_string())
                    .finish();
                let sep = if self.page.contains('?') { '&' } else { '?' };
                format!("{}{}{}", self.page, sep, query)
            }
        }
    }

    pub fn payment_url(&self) -> Option<String> {
        self.backend_link("payment")
    }

    pub fn invoice_url(&self) -> Option<String> {
        self.backend_link("invoice")
    }

    fn backend_link(&self, kind: &str) -> Option<String> {
        let id = self.booking_id.as_ref()?;
        let id = form_urlencoded::byte_serialize(id.to_string().as_bytes()).collect::<String>();
        Some(format!("{}/{}/{}/", self.api_base.trim_end_matches('/'), kind, id))
    }
}

/// Turn a finished round trip into the submission outcome.
pub fn resolve(
    result: Result<BookingResult, ApiError>,
    page: &str,
    api_base: &str,
) -> Result<Confirmation, BookingError> {
    let res = result?;
    if !res.success {
        return Err(BookingError::Rejected);
    }
    Ok(Confirmation::new(page, res.booking_id, api_base))
}

/// Idle -> Submitting -> (Redirected | Idle). Exactly one request per submission.
pub struct BookingSubmitter<A: EventApi> {
    api: Arc<A>,
    phase: SubmitPhase,
    confirmation_page: String,
    api_base: String,
}

impl<A: EventApi> BookingSubmitter<A> {
    pub fn new(api: Arc<A>, confirmation_page: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self { api, phase: SubmitPhase::Idle, confirmation_page: confirmation_page.into(), api_base: api_base.into() }
    }

    pub fn phase(&self) -> SubmitPhase { self.phase }

    fn enter(&mut self, phase: SubmitPhase, view: &mut dyn BookingView) {
        debug!(from = ?self.phase, to = ?phase, "booking phase");
        self.phase = phase;
        view.render(phase.control());
    }

    /// Run one submission. The view only sees control-state renders here; turning the
    /// result into a notification or navigation is the caller's job.
    pub async fn submit(&mut self, form: &BookingForm, view: &mut dyn BookingView) -> Result<Confirmation, BookingError> {
        if self.phase != SubmitPhase::Idle {
            return Err(BookingError::NotIdle);
        }
        self.enter(SubmitPhase::Submitting, view);

        let req = BookingRequest::from(form);
        let outcome = resolve(self.api.submit_booking(&req).await, &self.confirmation_page, &self.api_base);

        match &outcome {
            Ok(c) => {
                info!(booking_id = ?c.booking_id, "booking accepted");
                self.phase = SubmitPhase::Redirected;
            }
            Err(e) => {
                warn!("booking failed: {}", e);
                self.enter(SubmitPhase::Idle, view);
            }
        }
        outcome
    }
}
