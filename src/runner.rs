//! Script runner: the imperative half of the run-marker protocol.
//!
//! [`ScriptRunner::on_change`] takes the full text after an edit, plans it
//! with [`apply_edit`], carries out the side effects (store `defaultURL`,
//! POST the script) and returns the buffer that should replace the text.
//!
//! Runs may overlap. Every triggered run takes a new generation number, and
//! a run that finishes after a newer one was triggered is reported as
//! [`RunOutcome::Superseded`] rather than handing back a buffer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::http_client::Transport;
use crate::protocol::{apply_edit, Edit, Fallback, Outcome, RunPlan, SideEffect};
use crate::store::{KeyValueStore, DEFAULT_URL_KEY};

/// What a change event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No run marker; the text stands as-is.
    Idle,
    /// The run finished and this text replaces the buffer.
    Replaced(String),
    /// A newer run was triggered while this one was in flight.
    Superseded,
}

/// Generation handed out when a run is triggered.
///
/// Take it with [`ScriptRunner::begin`] at the moment of the trigger, before
/// the run is spawned, so trigger order decides which result survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Ticket {
    generation: u64,
}

/// Owns the transport, the store and the in-flight generation counter.
pub struct ScriptRunner {
    transport: Arc<dyn Transport>,
    store: Arc<dyn KeyValueStore>,
    fallback: Fallback,
    generation: AtomicU64,
}

impl ScriptRunner {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
        fallback: Fallback,
    ) -> Self {
        Self {
            transport,
            store,
            fallback,
            generation: AtomicU64::new(0),
        }
    }

    /// Plan `text` without touching the network or the store.
    pub fn plan(&self, text: &str) -> Edit {
        apply_edit(text, &self.fallback)
    }

    /// Register a trigger. Every earlier ticket stops being current.
    pub fn begin(&self) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "Run triggered");
        Ticket { generation }
    }

    /// Whether no run was triggered after `ticket`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Handle a full-text change.
    pub async fn on_change(&self, text: &str) -> RunOutcome {
        match self.plan(text) {
            Edit::Accept => RunOutcome::Idle,
            Edit::Run(plan) => {
                let ticket = self.begin();
                self.run(&plan, ticket).await
            }
        }
    }

    /// Carry out a planned run triggered as `ticket`.
    #[instrument(skip(self, plan), fields(url = %plan.url, namespace = %plan.namespace, generation = ticket.generation))]
    pub async fn run(&self, plan: &RunPlan, ticket: Ticket) -> RunOutcome {
        let mut outcome = None;
        for effect in plan.effects() {
            match effect {
                SideEffect::StoreDefaultUrl(url) => self.store_default_url(url).await,
                SideEffect::Post { url, request } => {
                    outcome = Some(match self.transport.post_script(&url, &request).await {
                        Ok(reply) => {
                            if let Err(e) = reply.parse() {
                                warn!(status = reply.status, error = %e, "Unexpected response shape");
                            }
                            Outcome::Replied(reply)
                        }
                        Err(e) => {
                            warn!(error = %e, "Request failed");
                            Outcome::TransportFailed(e.message)
                        }
                    });
                }
            }
        }

        if !self.is_current(ticket) {
            info!("Dropping superseded result");
            return RunOutcome::Superseded;
        }

        match outcome {
            Some(outcome) => RunOutcome::Replaced(plan.complete(&outcome)),
            None => RunOutcome::Idle,
        }
    }

    /// Stores may touch the filesystem, so the write runs on the blocking pool.
    async fn store_default_url(&self, url: String) {
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || store.set(DEFAULT_URL_KEY, &url)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Could not store {DEFAULT_URL_KEY}"),
            Err(e) => warn!(error = %e, "Store task failed"),
        }
    }
}
