//! Debounced, timeout-bounded membership verification.
//!
//! The verifier waits out a quiet period before looking numbers up, skips
//! tickets superseded in the meantime, runs the remaining lookups
//! concurrently, and applies each response through the session's token
//! check. A lookup that outlives the timeout resolves its slot as invalid.

use std::time::Duration;

use tokio::task::JoinSet;

use crate::membership::{LookupOutcome, MembershipLookup};
use crate::session::{Applied, LookupTicket, RosterSession};

/// Counts from one [`DebouncedVerifier::verify_all`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub applied: usize,
    /// Responses discarded because a newer edit superseded them.
    pub stale: usize,
    /// Tickets already superseded when the quiet period ended.
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct DebouncedVerifier<L> {
    lookup: L,
    debounce: Duration,
    timeout: Duration,
}

impl<L> DebouncedVerifier<L>
where
    L: MembershipLookup + Clone + 'static,
{
    pub const fn new(lookup: L, debounce: Duration, timeout: Duration) -> Self {
        Self {
            lookup,
            debounce,
            timeout,
        }
    }

    /// Look up a single ticket, bounded by the timeout.
    pub async fn resolve(&self, ticket: &LookupTicket) -> LookupOutcome {
        run_lookup(&self.lookup, &ticket.number, self.timeout).await
    }

    /// Wait out the quiet period, then verify every ticket that is still
    /// current and apply the results to `session`.
    pub async fn verify_all(
        &self,
        session: &mut RosterSession,
        tickets: Vec<LookupTicket>,
    ) -> VerifyReport {
        let mut report = VerifyReport::default();
        if tickets.is_empty() {
            return report;
        }
        tokio::time::sleep(self.debounce).await;

        let mut set = JoinSet::new();
        for ticket in tickets {
            if !session.is_current(&ticket) {
                tracing::debug!(member = %ticket.member, token = ticket.token, "skipping superseded lookup");
                report.skipped += 1;
                continue;
            }
            let lookup = self.lookup.clone();
            let timeout = self.timeout;
            set.spawn(async move {
                let outcome = run_lookup(&lookup, &ticket.number, timeout).await;
                (ticket, outcome)
            });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((ticket, outcome)) => match session.apply_lookup(&ticket, outcome) {
                    Applied::Applied => report.applied += 1,
                    Applied::Stale => report.stale += 1,
                },
                Err(e) => tracing::warn!(error = %e, "membership lookup task failed"),
            }
        }
        tracing::debug!(?report, "verification pass finished");
        report
    }
}

async fn run_lookup<L: MembershipLookup>(lookup: &L, number: &str, timeout: Duration) -> LookupOutcome {
    match tokio::time::timeout(timeout, lookup.lookup(number)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::warn!(number, timeout_secs = timeout.as_secs(), "membership lookup timed out");
            LookupOutcome::Failed(format!("timed out after {}s", timeout.as_secs()))
        }
    }
}
