//! Membership number format checks and the external lookup seam.
//!
//! A membership number is an optional, 7-character reference into an
//! external system of record. Only well-formed numbers are sent to the
//! lookup service; any failure there resolves the member as invalid.

use std::future::Future;

use tek_core::entities::MemberIdentity;
use tek_core::limits::MEMBERSHIP_NUMBER_LEN;

/// Local classification of a raw membership number input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipInput {
    /// Nothing entered. Manual identity entry applies.
    Empty,
    /// Wrong length; never sent to the lookup service.
    Malformed,
    /// Trimmed number ready for lookup.
    WellFormed(String),
}

/// Classify a raw membership number.
///
/// Surrounding whitespace is ignored. Length counts characters, not bytes.
#[must_use]
pub fn classify(raw: &str) -> MembershipInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        MembershipInput::Empty
    } else if trimmed.chars().count() == MEMBERSHIP_NUMBER_LEN {
        MembershipInput::WellFormed(trimmed.to_string())
    } else {
        MembershipInput::Malformed
    }
}

/// Result of asking the membership service about a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(MemberIdentity),
    NotFound,
    /// Transport error, timeout, or an unusable response.
    Failed(String),
}

/// Resolution of a membership number, as the roster sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Valid(MemberIdentity),
    Invalid,
}

/// Seam to the external membership verification service.
///
/// Implementations fold every failure into [`LookupOutcome`]; lookups never
/// return an error to the roster.
pub trait MembershipLookup: Send + Sync {
    fn lookup(&self, number: &str) -> impl Future<Output = LookupOutcome> + Send;
}

/// Resolve a membership number in one step, without a session.
///
/// Malformed numbers resolve to [`Resolution::Invalid`] without calling the
/// service. Returns `None` for an empty input, which is valid on its own.
pub async fn resolve_membership_number<L: MembershipLookup>(
    lookup: &L,
    raw: &str,
) -> Option<Resolution> {
    match classify(raw) {
        MembershipInput::Empty => None,
        MembershipInput::Malformed => {
            tracing::debug!(number = raw, "membership number has wrong length");
            Some(Resolution::Invalid)
        }
        MembershipInput::WellFormed(number) => match lookup.lookup(&number).await {
            LookupOutcome::Found(identity) => Some(Resolution::Valid(identity)),
            LookupOutcome::NotFound => Some(Resolution::Invalid),
            LookupOutcome::Failed(reason) => {
                tracing::warn!(%number, %reason, "membership lookup failed");
                Some(Resolution::Invalid)
            }
        },
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tek_core::entities::MemberIdentity;
    use tek_core::enums::Gender;

    use super::{LookupOutcome, MembershipLookup};

    pub fn identity(number: &str, name: &str, gender: Gender) -> MemberIdentity {
        MemberIdentity {
            membership_number: number.to_string(),
            full_name: name.to_string(),
            email: format!("{}@members.example.org", name.to_lowercase()),
            phone: "05551234567".to_string(),
            gender,
        }
    }

    /// In-memory membership directory with optional per-number latency.
    #[derive(Clone, Default)]
    pub struct FakeDirectory {
        members: Arc<HashMap<String, MemberIdentity>>,
        delays: Arc<HashMap<String, Duration>>,
        calls: Arc<AtomicUsize>,
    }

    impl FakeDirectory {
        pub fn with(members: Vec<MemberIdentity>) -> Self {
            Self {
                members: Arc::new(
                    members
                        .into_iter()
                        .map(|m| (m.membership_number.clone(), m))
                        .collect(),
                ),
                ..Self::default()
            }
        }

        pub fn with_delay(mut self, number: &str, delay: Duration) -> Self {
            let mut delays = (*self.delays).clone();
            delays.insert(number.to_string(), delay);
            self.delays = Arc::new(delays);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MembershipLookup for FakeDirectory {
        async fn lookup(&self, number: &str) -> LookupOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delays.get(number) {
                tokio::time::sleep(*delay).await;
            }
            self.members
                .get(number)
                .cloned()
                .map_or(LookupOutcome::NotFound, LookupOutcome::Found)
        }
    }
}
