use std::time::Instant;

use uuid::Uuid;

use crate::client::CandidateApi;
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::ui::candidate_card::{CandidateCard, CardOutcome};
use crate::ui::candidate_list::{matches_query, ListView};
use crate::ui::referral_form::{ReferralForm, SubmitOutcome};
use crate::ui::search_bar::SearchBar;

pub const LOAD_FAILED: &str = "Failed to load candidates";
pub const LOADING: &str = "Loading candidates...";

/// Top-level screen. Owns the one authoritative candidate list and re-fetches it after
/// every successful mutation; cards and filters are derived from it.
pub struct Dashboard<A: CandidateApi> {
    api: A,
    api_base_url: String,
    cards: Vec<CandidateCard>,
    search: SearchBar,
    form: ReferralForm,
    loading: bool,
    error: Option<String>,
}

impl<A: CandidateApi> Dashboard<A> {
    pub fn new(api: A, api_base_url: impl Into<String>) -> Self {
        Self {
            api,
            api_base_url: api_base_url.into(),
            cards: Vec::new(),
            search: SearchBar::new(),
            form: ReferralForm::new(),
            loading: true,
            error: None,
        }
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.cards.iter().map(CandidateCard::candidate)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn search(&mut self) -> &mut SearchBar {
        &mut self.search
    }

    pub fn form(&mut self) -> &mut ReferralForm {
        &mut self.form
    }

    /// Cards passing the current query, in list order.
    pub fn visible_cards(&self) -> Vec<&CandidateCard> {
        let query = self.search.query();
        self.cards
            .iter()
            .filter(|card| matches_query(card.candidate(), query))
            .collect()
    }

    pub fn list_view(&self) -> ListView {
        ListView::of(self.cards.len(), self.visible_cards().len())
    }

    /// Re-fetches the full list. On failure the previous list stays and the banner is set.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.fetch_candidates().await {
            Ok(candidates) => {
                let previous = std::mem::take(&mut self.cards);
                self.cards = candidates
                    .into_iter()
                    .map(|candidate| match previous.iter().find(|c| c.candidate().id == candidate.id) {
                        Some(old) => old.refreshed(candidate),
                        None => CandidateCard::new(candidate),
                    })
                    .collect();
                tracing::debug!(count = self.cards.len(), "candidates loaded");
            }
            Err(e) => {
                let message = if e.error.trim().is_empty() {
                    LOAD_FAILED.to_string()
                } else {
                    e.error
                };
                self.error = Some(message);
            }
        }

        self.loading = false;
    }

    pub async fn submit_form(&mut self, now: impl FnOnce() -> Instant) -> SubmitOutcome {
        let outcome = self.form.submit(&self.api, now).await;
        if outcome == SubmitOutcome::Created {
            self.load().await;
        }
        outcome
    }

    pub async fn change_status(
        &mut self,
        id: Uuid,
        status: CandidateStatus,
        now: impl FnOnce() -> Instant,
    ) -> CardOutcome {
        let Some(card) = self.cards.iter_mut().find(|c| c.candidate().id == id) else {
            return CardOutcome::Unchanged;
        };
        let outcome = card.change_status(&self.api, status, now).await;
        if outcome == CardOutcome::Refresh {
            self.load().await;
        }
        outcome
    }

    pub async fn delete(
        &mut self,
        id: Uuid,
        confirm: impl FnOnce(&str) -> bool,
        now: impl FnOnce() -> Instant,
    ) -> CardOutcome {
        let Some(card) = self.cards.iter_mut().find(|c| c.candidate().id == id) else {
            return CardOutcome::Unchanged;
        };
        let outcome = card.delete(&self.api, confirm, now).await;
        if outcome == CardOutcome::Refresh {
            self.load().await;
        }
        outcome
    }

    pub fn render(&self, now: Instant) -> String {
        let mut out = vec![
            "Candidate Referral Management System".to_string(),
            "Manage your candidate referrals efficiently".to_string(),
            String::new(),
        ];
        if let Some(error) = &self.error {
            out.push(format!("! {} (type `dismiss` to hide)", error));
            out.push(String::new());
        }
        out.push(self.form.render(now));
        out.push(String::new());
        out.push(self.search.render());
        out.push(String::new());

        if self.loading {
            out.push(LOADING.to_string());
            return out.join("\n");
        }

        out.push(self.list_view().heading());
        for (index, card) in self.visible_cards().into_iter().enumerate() {
            out.push(card.render(index + 1, &self.api_base_url, now));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::client::candidate_api::MockCandidateApi;
    use crate::client::ApiError;
    use crate::dto::candidate_dto::DeleteCandidateResponse;
    use crate::ui::candidate_list::{NO_CANDIDATES, NO_MATCHES};
    use crate::ui::referral_form::FormField;
    use chrono::{Duration as ChronoDuration, Utc};

    fn candidate(name: &str, job_title: &str, status: CandidateStatus, age_secs: i64) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            name: name.into(),
            email: format!("{}@co.com", name.to_lowercase()),
            phone: "9123456789".into(),
            job_title: job_title.into(),
            resume_url: String::new(),
            status,
            created_at: Utc::now() - ChronoDuration::seconds(age_secs),
        }
    }

    /// Mock whose list endpoint serves whatever is in the shared vector.
    fn api_over(records: Arc<Mutex<Vec<Candidate>>>) -> MockCandidateApi {
        let mut api = MockCandidateApi::new();
        api.expect_fetch_candidates()
            .returning(move || Ok(records.lock().unwrap().clone()));
        api
    }

    #[tokio::test]
    async fn starts_loading_then_shows_fetched_list() {
        let records = Arc::new(Mutex::new(vec![
            candidate("Amy", "Engineer", CandidateStatus::Pending, 10),
            candidate("Bob", "Sales", CandidateStatus::Hired, 20),
        ]));
        let mut dashboard = Dashboard::new(api_over(records), "http://api.test");
        assert!(dashboard.is_loading());
        assert!(dashboard.render(Instant::now()).contains(LOADING));

        dashboard.load().await;
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.candidates().count(), 2);
        assert_eq!(dashboard.list_view(), ListView::Showing(2));

        dashboard.search().input("eng");
        let names: Vec<_> = dashboard
            .visible_cards()
            .iter()
            .map(|c| c.candidate().name.clone())
            .collect();
        assert_eq!(names, vec!["Amy"]);

        dashboard.search().input("nobody");
        assert_eq!(dashboard.list_view().heading(), NO_MATCHES);
        dashboard.search().clear();
        assert_eq!(dashboard.visible_cards().len(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_sets_dismissible_banner() {
        let mut api = MockCandidateApi::new();
        api.expect_fetch_candidates()
            .returning(|| Err(ApiError::new("")));
        let mut dashboard = Dashboard::new(api, "http://api.test");

        dashboard.load().await;
        assert_eq!(dashboard.error(), Some(LOAD_FAILED));
        assert_eq!(dashboard.list_view().heading(), NO_CANDIDATES);

        dashboard.dismiss_error();
        assert_eq!(dashboard.error(), None);
    }

    #[tokio::test]
    async fn successful_mutations_refetch_the_list() {
        let amy = candidate("Amy", "Engineer", CandidateStatus::Pending, 10);
        let amy_id = amy.id;
        let records = Arc::new(Mutex::new(vec![amy]));
        let mut api = api_over(records.clone());

        let store = records.clone();
        api.expect_update_status().returning(move |id, status| {
            let mut records = store.lock().unwrap();
            let found = records.iter_mut().find(|c| c.id == id).unwrap();
            found.status = status;
            Ok(found.clone())
        });
        let store = records.clone();
        api.expect_delete_candidate().returning(move |id| {
            store.lock().unwrap().retain(|c| c.id != id);
            Ok(DeleteCandidateResponse {
                message: "Candidate deleted successfully".into(),
            })
        });

        let mut dashboard = Dashboard::new(api, "http://api.test");
        dashboard.load().await;

        let now = Instant::now();
        let outcome = dashboard
            .change_status(amy_id, CandidateStatus::Reviewed, || now)
            .await;
        assert_eq!(outcome, CardOutcome::Refresh);
        assert_eq!(
            dashboard.candidates().next().map(|c| c.status),
            Some(CandidateStatus::Reviewed)
        );

        let outcome = dashboard.delete(amy_id, |_| true, || now).await;
        assert_eq!(outcome, CardOutcome::Refresh);
        assert_eq!(dashboard.candidates().count(), 0);
        assert_eq!(dashboard.list_view(), ListView::Empty);
    }

    #[tokio::test]
    async fn created_referral_appears_after_refresh() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let mut api = api_over(records.clone());
        let store = records.clone();
        api.expect_create_candidate().returning(move |s| {
            let created = Candidate {
                id: Uuid::new_v4(),
                name: s.name,
                email: s.email,
                phone: s.phone,
                job_title: s.job_title,
                resume_url: String::new(),
                status: CandidateStatus::Pending,
                created_at: Utc::now(),
            };
            store.lock().unwrap().insert(0, created.clone());
            Ok(created)
        });

        let mut dashboard = Dashboard::new(api, "http://api.test");
        dashboard.load().await;
        assert_eq!(dashboard.list_view(), ListView::Empty);

        let form = dashboard.form();
        form.set(FormField::Name, "Jane Roe");
        form.set(FormField::Email, "jane@co.com");
        form.set(FormField::Phone, "9123456789");
        form.set(FormField::JobTitle, "Engineer");

        assert_eq!(dashboard.submit_form(Instant::now).await, SubmitOutcome::Created);
        assert_eq!(dashboard.list_view(), ListView::Showing(1));
        assert_eq!(dashboard.candidates().next().map(|c| c.name.as_str()), Some("Jane Roe"));
    }

    #[tokio::test]
    async fn failed_status_change_does_not_refetch() {
        let amy = candidate("Amy", "Engineer", CandidateStatus::Pending, 10);
        let amy_id = amy.id;
        let mut api = MockCandidateApi::new();
        let served = vec![amy];
        api.expect_fetch_candidates()
            .times(1)
            .returning(move || Ok(served.clone()));
        api.expect_update_status()
            .returning(|_, _| Err(ApiError::new("Server error")));

        let mut dashboard = Dashboard::new(api, "http://api.test");
        dashboard.load().await;

        let now = Instant::now();
        let outcome = dashboard
            .change_status(amy_id, CandidateStatus::Hired, || now)
            .await;
        assert_eq!(outcome, CardOutcome::Unchanged);
        let card = dashboard.visible_cards()[0];
        assert_eq!(card.displayed_status(), CandidateStatus::Pending);
        assert_eq!(card.error(now), Some("Server error"));
    }
}
