//! The roster-editing session.
//!
//! A [`RosterSession`] holds one [`MemberSlot`] per member, addressed by a
//! stable [`MemberId`] rather than by position, so removing a member never
//! shifts another member's verification state. Every membership number
//! edit issues a session-wide, strictly increasing token; a lookup response
//! is applied only if its token is still the slot's latest.

use std::fmt;

use tek_core::entities::{MemberIdentity, NewTeam, NewTeamMember};
use tek_core::enums::{FieldSource, Gender, ProjectField, RegistrationType};
use tek_core::limits::{MAX_TEAM_MEMBERS, MIN_TEAM_MEMBERS};

use crate::RosterError;
use crate::membership::{LookupOutcome, MembershipInput, classify};
use crate::validate::{
    RosterMember, validate_gender_consistency, validate_leader, validate_member_count,
    validate_verification_complete,
};

/// Stable handle of a roster slot for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(u64);

impl MemberId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Verification state of one slot's membership number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerificationStatus {
    /// No number entered.
    #[default]
    Empty,
    /// Lookup issued, response not yet applied.
    Pending,
    Valid(MemberIdentity),
    /// Malformed, unknown, or the lookup failed.
    Invalid,
}

/// Identity fields a registrant types in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberField {
    FullName,
    Email,
    Phone,
}

impl MemberField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// One member of the roster being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSlot {
    id: MemberId,
    draft: NewTeamMember,
    source: FieldSource,
    status: VerificationStatus,
    latest_token: u64,
}

impl MemberSlot {
    fn new(id: MemberId, draft: NewTeamMember) -> Self {
        Self {
            id,
            draft,
            source: FieldSource::Manual,
            status: VerificationStatus::Empty,
            latest_token: 0,
        }
    }

    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    #[must_use]
    pub const fn draft(&self) -> &NewTeamMember {
        &self.draft
    }

    #[must_use]
    pub const fn source(&self) -> FieldSource {
        self.source
    }

    #[must_use]
    pub const fn status(&self) -> &VerificationStatus {
        &self.status
    }

    #[must_use]
    pub const fn latest_token(&self) -> u64 {
        self.latest_token
    }

    fn clear_autofill(&mut self) {
        if self.source == FieldSource::Verified {
            self.draft.full_name.clear();
            self.draft.email.clear();
            self.draft.phone.clear();
            self.source = FieldSource::Manual;
        }
    }

    fn autofill(&mut self, identity: &MemberIdentity) {
        self.draft.full_name.clone_from(&identity.full_name);
        self.draft.email.clone_from(&identity.email);
        self.draft.phone.clone_from(&identity.phone);
        self.source = FieldSource::Verified;
    }
}

impl RosterMember for MemberSlot {
    fn is_leader(&self) -> bool {
        self.draft.is_leader
    }

    fn verified_gender(&self) -> Option<Gender> {
        match &self.status {
            VerificationStatus::Valid(identity) => Some(identity.gender),
            _ => None,
        }
    }

    fn has_unresolved_membership(&self) -> bool {
        self.draft.membership_number.is_some()
            && !matches!(self.status, VerificationStatus::Valid(_))
    }
}

/// A lookup the caller must run and feed back through
/// [`RosterSession::apply_lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub member: MemberId,
    pub token: u64,
    pub number: String,
}

/// Whether a lookup response changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// Superseded by a newer edit, or the slot was removed.
    Stale,
}

/// Team-level fields of the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDetails {
    pub team_name: String,
    pub registration_type: RegistrationType,
    pub field: ProjectField,
    pub initial_idea: Option<String>,
    pub gender: Gender,
}

/// An in-progress team registration.
#[derive(Debug, Clone)]
pub struct RosterSession {
    details: TeamDetails,
    slots: Vec<MemberSlot>,
    next_id: u64,
    next_token: u64,
}

impl RosterSession {
    /// A fresh form with the minimum number of empty slots; the first slot
    /// leads.
    #[must_use]
    pub fn new(details: TeamDetails) -> Self {
        let mut session = Self {
            details,
            slots: Vec::with_capacity(MAX_TEAM_MEMBERS),
            next_id: 0,
            next_token: 0,
        };
        for _ in 0..MIN_TEAM_MEMBERS {
            session.push_slot(blank_member());
        }
        session.slots[0].draft.is_leader = true;
        session
    }

    /// Load a drafted registration, issuing lookups for every entered
    /// membership number.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::RosterSize`] or [`RosterError::Leader`] when the
    /// draft breaks those rules. The draft is never corrected.
    pub fn from_draft(team: NewTeam) -> Result<(Self, Vec<LookupTicket>), RosterError> {
        validate_member_count(&team.members)?;
        validate_leader(&team.members)?;

        let mut session = Self {
            details: TeamDetails {
                team_name: team.team_name,
                registration_type: team.registration_type,
                field: team.field,
                initial_idea: team.initial_idea,
                gender: team.gender,
            },
            slots: Vec::with_capacity(MAX_TEAM_MEMBERS),
            next_id: 0,
            next_token: 0,
        };

        let mut tickets = Vec::new();
        for mut member in team.members {
            let number = member.membership_number.take();
            let id = session.push_slot(member);
            if let Some(number) = number
                && let Some(ticket) = session.set_membership_number(id, &number)?
            {
                tickets.push(ticket);
            }
        }
        Ok((session, tickets))
    }

    fn push_slot(&mut self, draft: NewTeamMember) -> MemberId {
        self.next_id += 1;
        let id = MemberId(self.next_id);
        self.slots.push(MemberSlot::new(id, draft));
        id
    }

    fn slot_mut(&mut self, id: MemberId) -> Result<&mut MemberSlot, RosterError> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RosterError::UnknownMember(id.0))
    }

    #[must_use]
    pub const fn details(&self) -> &TeamDetails {
        &self.details
    }

    pub const fn details_mut(&mut self) -> &mut TeamDetails {
        &mut self.details
    }

    /// Slots in current roster order.
    #[must_use]
    pub fn members(&self) -> &[MemberSlot] {
        &self.slots
    }

    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&MemberSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Current 0-based position of a member.
    #[must_use]
    pub fn index_of(&self, id: MemberId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    #[must_use]
    pub fn leader(&self) -> Option<MemberId> {
        self.slots.iter().find(|s| s.draft.is_leader).map(|s| s.id)
    }

    /// Append an empty, non-leader slot.
    ///
    /// # Errors
    ///
    /// [`RosterError::RosterSize`] when the roster is already full.
    pub fn add_member(&mut self) -> Result<MemberId, RosterError> {
        if self.slots.len() >= MAX_TEAM_MEMBERS {
            return Err(RosterError::RosterSize {
                count: self.slots.len() + 1,
                min: MIN_TEAM_MEMBERS,
                max: MAX_TEAM_MEMBERS,
            });
        }
        Ok(self.push_slot(blank_member()))
    }

    /// Remove a slot and everything it holds. If it led the team,
    /// leadership moves to the first remaining member.
    ///
    /// # Errors
    ///
    /// [`RosterError::RosterSize`] at the minimum roster size, or
    /// [`RosterError::UnknownMember`].
    pub fn remove_member(&mut self, id: MemberId) -> Result<MemberSlot, RosterError> {
        let index = self.index_of(id).ok_or(RosterError::UnknownMember(id.0))?;
        if self.slots.len() <= MIN_TEAM_MEMBERS {
            return Err(RosterError::RosterSize {
                count: self.slots.len() - 1,
                min: MIN_TEAM_MEMBERS,
                max: MAX_TEAM_MEMBERS,
            });
        }
        let removed = self.slots.remove(index);
        if removed.draft.is_leader {
            self.slots[0].draft.is_leader = true;
            tracing::debug!(removed = %id, leader = %self.slots[0].id, "leadership moved");
        }
        Ok(removed)
    }

    /// Make `id` the only leader.
    ///
    /// # Errors
    ///
    /// [`RosterError::UnknownMember`].
    pub fn set_leader(&mut self, id: MemberId) -> Result<(), RosterError> {
        if self.index_of(id).is_none() {
            return Err(RosterError::UnknownMember(id.0));
        }
        for slot in &mut self.slots {
            slot.draft.is_leader = slot.id == id;
        }
        Ok(())
    }

    /// Edit a manually entered identity field.
    ///
    /// # Errors
    ///
    /// [`RosterError::VerifiedFieldLocked`] when the field was filled from
    /// the membership record, or [`RosterError::UnknownMember`].
    pub fn set_field(
        &mut self,
        id: MemberId,
        field: MemberField,
        value: &str,
    ) -> Result<(), RosterError> {
        let position = self.index_of(id).map_or(0, |i| i + 1);
        let slot = self.slot_mut(id)?;
        if slot.source.is_read_only() {
            return Err(RosterError::VerifiedFieldLocked {
                position,
                field: field.as_str(),
            });
        }
        let target = match field {
            MemberField::FullName => &mut slot.draft.full_name,
            MemberField::Email => &mut slot.draft.email,
            MemberField::Phone => &mut slot.draft.phone,
        };
        value.clone_into(target);
        Ok(())
    }

    /// Record a membership number edit.
    ///
    /// Always issues a new token and drops any autofilled identity. Empty
    /// input returns the slot to manual entry; a malformed number is
    /// invalid at once. Only a well-formed number yields a ticket.
    ///
    /// # Errors
    ///
    /// [`RosterError::UnknownMember`].
    pub fn set_membership_number(
        &mut self,
        id: MemberId,
        raw: &str,
    ) -> Result<Option<LookupTicket>, RosterError> {
        self.next_token += 1;
        let token = self.next_token;
        let slot = self.slot_mut(id)?;
        slot.latest_token = token;
        slot.clear_autofill();

        let ticket = match classify(raw) {
            MembershipInput::Empty => {
                slot.draft.membership_number = None;
                slot.status = VerificationStatus::Empty;
                None
            }
            MembershipInput::Malformed => {
                slot.draft.membership_number = Some(raw.trim().to_string());
                slot.status = VerificationStatus::Invalid;
                None
            }
            MembershipInput::WellFormed(number) => {
                slot.draft.membership_number = Some(number.clone());
                slot.status = VerificationStatus::Pending;
                Some(LookupTicket {
                    member: id,
                    token,
                    number,
                })
            }
        };
        tracing::debug!(member = %id, token, pending = ticket.is_some(), "membership number edited");
        Ok(ticket)
    }

    /// Whether `ticket` is still the latest edit of a live slot.
    #[must_use]
    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        self.member(ticket.member)
            .is_some_and(|slot| slot.latest_token == ticket.token)
    }

    /// Apply a lookup response if its ticket is still current.
    pub fn apply_lookup(&mut self, ticket: &LookupTicket, outcome: LookupOutcome) -> Applied {
        if !self.is_current(ticket) {
            tracing::debug!(member = %ticket.member, token = ticket.token, "discarding stale lookup");
            return Applied::Stale;
        }
        let Some(slot) = self.slots.iter_mut().find(|s| s.id == ticket.member) else {
            return Applied::Stale;
        };
        match outcome {
            LookupOutcome::Found(identity) => {
                slot.autofill(&identity);
                slot.status = VerificationStatus::Valid(identity);
            }
            LookupOutcome::NotFound => {
                slot.clear_autofill();
                slot.status = VerificationStatus::Invalid;
            }
            LookupOutcome::Failed(reason) => {
                tracing::warn!(member = %ticket.member, %reason, "membership lookup failed");
                slot.clear_autofill();
                slot.status = VerificationStatus::Invalid;
            }
        }
        Applied::Applied
    }

    /// Run the roster rules in order: count, leader, verification, gender.
    /// The first failure is returned.
    ///
    /// # Errors
    ///
    /// The first violated [`RosterError`].
    pub fn validate(&self) -> Result<(), RosterError> {
        validate_member_count(&self.slots)?;
        validate_leader(&self.slots)?;
        validate_verification_complete(&self.slots)?;
        validate_gender_consistency(self.details.gender, &self.slots)
    }

    /// The registration payload for the current roster.
    #[must_use]
    pub fn to_new_team(&self) -> NewTeam {
        NewTeam {
            team_name: self.details.team_name.clone(),
            registration_type: self.details.registration_type,
            field: self.details.field,
            initial_idea: self.details.initial_idea.clone(),
            members: self.slots.iter().map(|s| s.draft.clone()).collect(),
            gender: self.details.gender,
        }
    }
}

fn blank_member() -> NewTeamMember {
    NewTeamMember {
        full_name: String::new(),
        email: String::new(),
        phone: String::new(),
        membership_number: None,
        is_leader: false,
    }
}
