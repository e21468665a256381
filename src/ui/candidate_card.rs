use std::time::Instant;

use crate::client::{ApiError, CandidateApi};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::ui::flash::{visible, Flash, CARD_MESSAGE_TTL};
use crate::utils::time::to_display;

pub const STATUS_UPDATED: &str = "Status updated successfully!";
pub const STATUS_UPDATE_FAILED: &str = "Failed to update status";
pub const CANDIDATE_DELETED: &str = "Candidate deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete candidate";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this candidate?";

/// What the parent should do after a card action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOutcome {
    Refresh,
    Unchanged,
}

/// An in-flight optimistic status change.
///
/// Created by [`CandidateCard::begin_status_change`] and consumed by
/// [`CandidateCard::finish_status_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PendingStatusChange {
    pub previous: CandidateStatus,
    pub requested: CandidateStatus,
}

/// Local state for one candidate row.
#[derive(Debug, Clone)]
pub struct CandidateCard {
    candidate: Candidate,
    displayed_status: CandidateStatus,
    in_flight: bool,
    message: Option<Flash>,
    error: Option<Flash>,
}

impl CandidateCard {
    pub fn new(candidate: Candidate) -> Self {
        Self {
            displayed_status: candidate.status,
            candidate,
            in_flight: false,
            message: None,
            error: None,
        }
    }

    /// Rebuilds the card from a refreshed record, keeping any banner still showing.
    pub fn refreshed(&self, candidate: Candidate) -> Self {
        Self {
            message: self.message.clone(),
            error: self.error.clone(),
            ..Self::new(candidate)
        }
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn displayed_status(&self) -> CandidateStatus {
        self.displayed_status
    }

    /// The status selector is disabled while a change is in flight.
    pub fn selector_enabled(&self) -> bool {
        !self.in_flight
    }

    pub fn message(&self, now: Instant) -> Option<&str> {
        visible(&self.message, now)
    }

    pub fn error(&self, now: Instant) -> Option<&str> {
        visible(&self.error, now)
    }

    /// Phase one: show the requested status right away. `None` while another change is in flight.
    pub fn begin_status_change(&mut self, requested: CandidateStatus) -> Option<PendingStatusChange> {
        if self.in_flight {
            return None;
        }
        let change = PendingStatusChange {
            previous: self.displayed_status,
            requested,
        };
        self.displayed_status = requested;
        self.in_flight = true;
        self.message = None;
        self.error = None;
        Some(change)
    }

    /// Phase two: keep the new status on success, restore the previous one on failure.
    pub fn finish_status_change(
        &mut self,
        change: PendingStatusChange,
        result: Result<Candidate, ApiError>,
        now: Instant,
    ) -> CardOutcome {
        self.in_flight = false;
        match result {
            Ok(updated) => {
                self.displayed_status = updated.status;
                self.candidate = updated;
                self.message = Some(Flash::success(STATUS_UPDATED, now, CARD_MESSAGE_TTL));
                CardOutcome::Refresh
            }
            Err(e) => {
                self.displayed_status = change.previous;
                self.error = Some(Flash::error(
                    non_empty_or(e.error, STATUS_UPDATE_FAILED),
                    now,
                    CARD_MESSAGE_TTL,
                ));
                CardOutcome::Unchanged
            }
        }
    }

    pub async fn change_status<A: CandidateApi + ?Sized>(
        &mut self,
        api: &A,
        requested: CandidateStatus,
        now: impl FnOnce() -> Instant,
    ) -> CardOutcome {
        let Some(change) = self.begin_status_change(requested) else {
            return CardOutcome::Unchanged;
        };
        let result = api.update_status(self.candidate.id, requested).await;
        self.finish_status_change(change, result, now())
    }

    /// Deletes after `confirm` approves [`DELETE_PROMPT`].
    pub async fn delete<A: CandidateApi + ?Sized>(
        &mut self,
        api: &A,
        confirm: impl FnOnce(&str) -> bool,
        now: impl FnOnce() -> Instant,
    ) -> CardOutcome {
        if !confirm(DELETE_PROMPT) {
            return CardOutcome::Unchanged;
        }
        match api.delete_candidate(self.candidate.id).await {
            Ok(_) => {
                self.message = Some(Flash::success(CANDIDATE_DELETED, now(), CARD_MESSAGE_TTL));
                CardOutcome::Refresh
            }
            Err(e) => {
                self.error = Some(Flash::error(
                    non_empty_or(e.error, DELETE_FAILED),
                    now(),
                    CARD_MESSAGE_TTL,
                ));
                CardOutcome::Unchanged
            }
        }
    }

    pub fn render(&self, index: usize, api_base_url: &str, now: Instant) -> String {
        let c = &self.candidate;
        let mut lines = vec![
            format!("{:>3}. {} [{}]", index, c.name, self.displayed_status),
            format!("     Email:     {}", c.email),
            format!("     Phone:     {}", c.phone),
            format!("     Job Title: {}", c.job_title),
            format!("     Added:     {}", to_display(c.created_at)),
        ];
        if let Some(link) = crate::client::candidate_api::resume_link(api_base_url, &c.resume_url) {
            lines.push(format!("     Resume:    {}", link));
        }
        if self.in_flight {
            lines.push("     (updating...)".to_string());
        }
        if let Some(text) = self.message(now) {
            lines.push(format!("     + {}", text));
        }
        if let Some(text) = self.error(now) {
            lines.push(format!("     ! {}", text));
        }
        lines.join("\n")
    }
}

fn non_empty_or(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
