//! # tek-roster
//!
//! Roster assembly and validation for team and individual registrations.
//!
//! - [`validate`]: member count bounds, single leader, gender consistency,
//!   and verification completeness
//! - [`membership`]: membership number format checks and the lookup seam
//! - [`session`]: the roster-editing session with per-member verification
//!   state and stale-response discarding
//! - [`verifier`]: debounced, timeout-bounded lookups driving a session
//! - [`fields`]: per-field constraints on registration and project payloads
//! - [`assignment`]: admin grouping of unassigned individuals into teams

pub mod assignment;
pub mod fields;
pub mod membership;
pub mod session;
pub mod validate;
pub mod verifier;

mod error;

pub use error::RosterError;
pub use fields::{FieldError, FieldErrors};
pub use membership::{LookupOutcome, MembershipLookup, Resolution, resolve_membership_number};
pub use session::{
    Applied, LookupTicket, MemberField, MemberId, MemberSlot, RosterSession, TeamDetails,
    VerificationStatus,
};
pub use verifier::{DebouncedVerifier, VerifyReport};
