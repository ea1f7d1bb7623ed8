//! Client session state.
//!
//! Holds the navigation state of one user session and the single "current"
//! analysis result. Analyses are sequenced at dispatch, so a reply that
//! finishes after a newer request has started is discarded instead of
//! overwriting the newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use trulogo_gateway::{AnalysisGateway, AnalysisService};
use trulogo_model::{AnalysisResult, AppView, SupportedLanguage};

/// Sequence number handed out when a request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Outcome of offering a completed result to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result is now current
    Accepted,
    /// A newer request started before this one completed
    Stale { sequence: u64, latest: u64 },
}

#[derive(Debug)]
struct Current {
    sequence: u64,
    result: AnalysisResult,
}

/// The single current analysis result, with stale-reply discarding.
#[derive(Debug, Default)]
pub struct ResultSlot {
    latest_started: AtomicU64,
    current: Mutex<Option<Current>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request; it supersedes every earlier one.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest_started.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Sequence of the most recently started request (0 if none).
    pub fn latest_started(&self) -> u64 {
        self.latest_started.load(Ordering::SeqCst)
    }

    /// Offer a completed result.
    ///
    /// Accepted only if no newer request has started since `ticket` was issued.
    pub fn complete(&self, ticket: RequestTicket, result: AnalysisResult) -> Completion {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let latest = self.latest_started();

        if ticket.0 < latest {
            tracing::debug!(
                sequence = ticket.0,
                latest,
                "Discarding stale analysis result"
            );
            return Completion::Stale {
                sequence: ticket.0,
                latest,
            };
        }

        *current = Some(Current {
            sequence: ticket.0,
            result,
        });
        Completion::Accepted
    }

    /// A copy of the current result, if any analysis has been accepted.
    pub fn current(&self) -> Option<AnalysisResult> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|c| c.result.clone())
    }

    /// Sequence of the request that produced the current result.
    pub fn current_sequence(&self) -> Option<u64> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|c| c.sequence)
    }

    /// Forget the current result.
    pub fn clear(&self) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// State of one user session.
#[derive(Debug, Default)]
pub struct Session {
    view: AppView,
    language: SupportedLanguage,
    results: ResultSlot,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppView {
        self.view
    }

    pub fn navigate(&mut self, view: AppView) {
        tracing::debug!(from = ?self.view, to = ?view, "Navigating");
        self.view = view;
    }

    pub fn language(&self) -> SupportedLanguage {
        self.language
    }

    pub fn set_language(&mut self, language: SupportedLanguage) {
        self.language = language;
    }

    pub fn results(&self) -> &ResultSlot {
        &self.results
    }

    /// The current analysis result, if any.
    pub fn current_result(&self) -> Option<AnalysisResult> {
        self.results.current()
    }

    /// Run an analysis and store its result unless a newer one has started.
    pub async fn run_analysis<S: AnalysisService>(
        &self,
        gateway: &AnalysisGateway<S>,
        image_base64: &str,
        brand_name: &str,
        context: &str,
    ) -> Completion {
        let ticket = self.results.begin();
        let result = gateway
            .analyze_logo_risk(image_base64, brand_name, context)
            .await;
        self.results.complete(ticket, result)
    }
}
