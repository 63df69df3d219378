//! Search state and its transitions.
//!
//! The state is owned by whoever drives the UI loop and changes only through
//! [`SearchState::set_city_text`], [`SearchState::submit`] and
//! [`SearchState::resolve_fetch`].

use tracing::debug;

use crate::{
    WeatherResult,
    fetcher::{FetchError, WeatherSource},
};

pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city";

/// What the panel shows below the input.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Idle,
    HasError(String),
    HasResult(WeatherResult),
}

/// Handle for one issued fetch. Hand it back to [`SearchState::resolve_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    city: String,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input; the error is already set and nothing should be fetched.
    Rejected,
    Fetch(FetchTicket),
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    city_text: String,
    view: View,
    latest_ticket: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city_text(&self) -> &str {
        &self.city_text
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn weather(&self) -> Option<&WeatherResult> {
        match &self.view {
            View::HasResult(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.view {
            View::HasError(message) => Some(message),
            _ => None,
        }
    }

    pub fn set_city_text(&mut self, text: impl Into<String>) {
        self.city_text = text.into();
    }

    pub fn submit(&mut self) -> Submission {
        if self.city_text.trim().is_empty() {
            self.view = View::HasError(EMPTY_CITY_MESSAGE.to_string());
            return Submission::Rejected;
        }

        self.latest_ticket += 1;
        Submission::Fetch(FetchTicket { seq: self.latest_ticket, city: self.city_text.clone() })
    }

    /// Apply a fetch outcome. Returns `false` if the ticket was superseded by a later
    /// submit, in which case the state is left untouched.
    pub fn resolve_fetch(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<WeatherResult, FetchError>,
    ) -> bool {
        if ticket.seq < self.latest_ticket {
            debug!(
                seq = ticket.seq,
                latest = self.latest_ticket,
                city = %ticket.city,
                "discarding stale weather result"
            );
            return false;
        }

        self.view = match outcome {
            Ok(result) => View::HasResult(result),
            Err(err) => View::HasError(err.user_message().to_string()),
        };
        true
    }

    /// Submit and, if accepted, fetch from `source` and apply the outcome in one go.
    pub async fn submit_with(&mut self, source: &dyn WeatherSource) {
        let Submission::Fetch(ticket) = self.submit() else {
            return;
        };

        let outcome = source.fetch(ticket.city()).await;
        self.resolve_fetch(&ticket, outcome);
    }
}
