use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info};

use crate::api::{ApiClient, ApiError, BookingError};
use crate::models::{Attendee, BookingRequest, Event};
use crate::render;

// how long the success toast stays up before auto-dismissing
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

const GENERIC_BOOKING_ALERT: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Open { event_id: String },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open { .. })
    }

    // the pending selection, if the modal is open
    pub fn selection(&self) -> Option<&str> {
        match self {
            Modal::Open { event_id } => Some(event_id),
            Modal::Closed => None,
        }
    }
}

// Where a click on the open modal overlay landed. Only a hit on the backdrop
// itself closes the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    Backdrop,
    Dialog,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub email: String,
    pub guests: u32,
}

impl BookingForm {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no event selected")]
    NoEventSelected,
    #[error("a booking is already in flight")]
    InFlight,
}

// The page's stand-in for the DOM: grid markup, modal state, the loader and
// toast flags, and the current form field values.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub grid: String,
    pub modal: Modal,
    pub loader_visible: bool,
    pub toast_visible: bool,
    pub scroll_locked: bool,
    pub submitting: bool,
    pub form: BookingForm,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            grid: String::new(),
            modal: Modal::Closed,
            loader_visible: false,
            toast_visible: false,
            scroll_locked: false,
            submitting: false,
            form: BookingForm::default(),
        }
    }
}

impl ViewState {
    // Refuses without a selection and while another submission is in flight.
    // Otherwise shows the loader and assembles the request from the current
    // form values verbatim.
    pub fn begin_submission(&mut self) -> Result<BookingRequest, SubmitError> {
        let event_id = match self.modal.selection() {
            Some(id) => id.to_string(),
            None => return Err(SubmitError::NoEventSelected),
        };
        if self.submitting {
            return Err(SubmitError::InFlight);
        }

        self.submitting = true;
        self.loader_visible = true;
        Ok(BookingRequest {
            event_id,
            attendee: Attendee {
                name: self.form.name.clone(),
                phone: self.form.phone.clone(),
                location: self.form.location.clone(),
                email: self.form.email.clone(),
            },
            total_tickets: self.form.guests,
        })
    }

    // Acceptance shows the toast, resets the form and closes the modal.
    // Rejection returns the blocking alert text and leaves the form populated
    // for a resubmit.
    pub fn finish_submission(&mut self, outcome: &Result<(), BookingError>) -> Option<String> {
        self.loader_visible = false;
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.toast_visible = true;
                self.form.reset();
                self.close_modal();
                None
            }
            Err(BookingError::Rejected(reason)) => Some(format!("Booking failed: {reason}")),
            Err(BookingError::Transport(_)) => Some(GENERIC_BOOKING_ALERT.to_string()),
        }
    }

    fn open_modal(&mut self, event_id: &str) {
        self.modal = Modal::Open {
            event_id: event_id.to_string(),
        };
        self.scroll_locked = true;
    }

    fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.scroll_locked = false;
    }
}

pub struct ViewStore {
    data: Mutex<ViewState>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(ViewState::default()),
        }
    }

    pub fn read(&self) -> ViewState {
        self.data.lock().expect("view mutex poisoned").clone()
    }

    pub fn update<F, R>(&self, transform: F) -> R
    where
        F: FnOnce(&mut ViewState) -> R,
    {
        let mut guard = self.data.lock().expect("view mutex poisoned");
        transform(&mut guard)
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

// Drives the event page: grid loading, the booking modal, and submissions.
// Gesture handling is synchronous on the store; only the API round-trips are
// async.
pub struct PageController {
    api: ApiClient,
    view: Arc<ViewStore>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Failed { alert: String },
}

impl PageController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            view: Arc::new(ViewStore::new()),
        }
    }

    pub fn state(&self) -> ViewState {
        self.view.read()
    }

    // --- grid ---

    pub fn events_loading(&self) {
        self.view
            .update(|state| state.grid = render::LOADING_HTML.to_string());
    }

    pub fn events_loaded(&self, outcome: Result<Vec<Event>, ApiError>) {
        match outcome {
            Ok(events) => {
                info!(count = events.len(), "rendering event grid");
                let grid = render::grid(&events, self.api.backend().base_url());
                self.view.update(|state| state.grid = grid);
            }
            Err(err) => {
                error!(%err, "failed to fetch events");
                self.view
                    .update(|state| state.grid = render::FETCH_ERROR_HTML.to_string());
            }
        }
    }

    // page-load workflow: loading placeholder, one fetch, one render
    pub async fn load_events(&self) {
        self.events_loading();
        let outcome = self.api.fetch_events().await;
        self.events_loaded(outcome);
    }

    // --- modal ---

    // a "Book a Ticket" click, dispatched with the clicked card's data-event-id
    pub fn book_ticket(&self, event_id: &str) {
        self.view.update(|state| state.open_modal(event_id));
    }

    pub fn close_modal(&self) {
        self.view.update(|state| state.close_modal());
    }

    pub fn overlay_click(&self, target: OverlayClick) {
        if target == OverlayClick::Backdrop {
            self.close_modal();
        }
    }

    // --- booking form ---

    pub fn set_form(&self, form: BookingForm) {
        self.view.update(|state| state.form = form);
    }

    pub fn dismiss_toast(&self) {
        self.view.update(|state| state.toast_visible = false);
    }

    // submit workflow: guard, loader, POST, outcome
    pub async fn submit_booking(&self) -> Result<Submission, SubmitError> {
        let request = self.view.update(|state| state.begin_submission())?;
        info!(event_id = %request.event_id, tickets = request.total_tickets, "submitting booking");

        let outcome = self.api.submit_booking(&request).await;
        let alert = self.view.update(|state| state.finish_submission(&outcome));

        match alert {
            None => {
                self.arm_toast_timer();
                Ok(Submission::Accepted)
            }
            Some(alert) => {
                error!(alert = %alert, "booking failed");
                Ok(Submission::Failed { alert })
            }
        }
    }

    fn arm_toast_timer(&self) {
        let view = Arc::clone(&self.view);
        tokio::spawn(async move {
            tokio::time::sleep(TOAST_DURATION).await;
            view.update(|state| state.toast_visible = false);
        });
    }
}
