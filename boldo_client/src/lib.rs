//! Client side of the contact form.
//!
//! [`FormController`] owns the field values and the submission status and
//! talks to the submission endpoint through a [`ContactApi`].

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub use crate::{
    api::{ContactApi, ContactApiResponse, ContactResponseBody, HttpContactApi},
    fields::{ContactField, ContactFields},
};

pub mod api;
mod fields;

pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(3);

pub const SUBMIT_FAILED_MESSAGE: &str = "Ошибка при отправке";
pub const CONNECTION_FAILED_MESSAGE: &str = "Ошибка подключения";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("A submission is already in progress.")]
pub struct SubmitInFlight;

#[derive(Debug, Clone, Copy)]
pub struct FormControllerConfig {
    /// Time after a successful submission until the status returns to idle.
    pub reset_delay: Duration,
}

impl Default for FormControllerConfig {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

#[derive(Debug, Default)]
struct FormState {
    fields: ContactFields,
    status: SubmitStatus,
}

#[derive(Debug)]
pub struct FormController<Api> {
    api: Api,
    config: FormControllerConfig,
    state: Arc<Mutex<FormState>>,
    in_flight: AtomicBool,
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl<Api: ContactApi> FormController<Api> {
    pub fn new(api: Api, config: FormControllerConfig) -> Self {
        Self {
            api,
            config,
            state: Default::default(),
            in_flight: AtomicBool::new(false),
            reset_task: Mutex::new(None),
        }
    }

    pub fn fields(&self) -> ContactFields {
        lock(&self.state).fields.clone()
    }

    pub fn status(&self) -> SubmitStatus {
        lock(&self.state).status.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn update_field(&self, field: ContactField, value: impl Into<String>) {
        lock(&self.state).fields.set(field, value.into());
    }

    /// Send the current field values to the submission endpoint.
    ///
    /// Must be called from within a tokio runtime, as a successful submission
    /// schedules the reset of the status.
    pub async fn submit(&self) -> Result<SubmitStatus, SubmitInFlight> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(SubmitInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.cancel_reset();

        let fields = self.fields();
        let status = match self.api.send(&fields).await {
            Ok(ContactApiResponse {
                is_success: true,
                body: ContactResponseBody { error: None, .. },
            }) => {
                debug!("contact form submitted");
                let mut state = lock(&self.state);
                state.fields = ContactFields::default();
                state.status = SubmitStatus::Success;
                drop(state);

                self.schedule_reset();
                return Ok(SubmitStatus::Success);
            }
            Ok(ContactApiResponse { body, .. }) => {
                let message = body
                    .error
                    .unwrap_or_else(|| SUBMIT_FAILED_MESSAGE.into());
                debug!(%message, "contact form submission refused");
                SubmitStatus::Error(message)
            }
            Err(err) => {
                warn!("Failed to submit contact form: {err:#}");
                SubmitStatus::Error(CONNECTION_FAILED_MESSAGE.into())
            }
        };

        lock(&self.state).status = status.clone();
        Ok(status)
    }

    fn schedule_reset(&self) {
        let state = Arc::clone(&self.state);
        let delay = self.config.reset_delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            if state.status == SubmitStatus::Success {
                state.status = SubmitStatus::Idle;
            }
        });

        if let Some(previous) = lock(&self.reset_task).replace(task) {
            previous.abort();
        }
    }

    fn cancel_reset(&self) {
        if let Some(task) = lock(&self.reset_task).take() {
            task.abort();
        }
    }
}

impl<Api> Drop for FormController<Api> {
    fn drop(&mut self) {
        let task = self
            .reset_task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The guarded values stay consistent even if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
