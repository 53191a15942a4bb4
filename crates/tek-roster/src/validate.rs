//! Roster-level rules: member count, leader, verification, gender.
//!
//! The checks are generic over [`RosterMember`] so the same rules apply to
//! a bare registration payload and to a live [`crate::RosterSession`].
//! Reported member positions are 1-based.

use tek_core::entities::NewTeamMember;
use tek_core::enums::Gender;
use tek_core::limits::{MAX_TEAM_MEMBERS, MIN_TEAM_MEMBERS};

use crate::RosterError;
use crate::membership::{MembershipInput, classify};

/// What the roster rules need to know about one member.
pub trait RosterMember {
    fn is_leader(&self) -> bool;

    /// Gender of the identity resolved from the membership number, if any.
    fn verified_gender(&self) -> Option<Gender> {
        None
    }

    /// A membership number was entered but has not resolved as valid.
    fn has_unresolved_membership(&self) -> bool {
        false
    }
}

/// A bare payload carries no verification state; only leadership applies.
impl RosterMember for NewTeamMember {
    fn is_leader(&self) -> bool {
        self.is_leader
    }
}

/// # Errors
///
/// [`RosterError::RosterSize`] unless `3 <= members.len() <= 6`.
pub fn validate_member_count<M>(members: &[M]) -> Result<(), RosterError> {
    let count = members.len();
    if count < MIN_TEAM_MEMBERS || count > MAX_TEAM_MEMBERS {
        return Err(RosterError::RosterSize {
            count,
            min: MIN_TEAM_MEMBERS,
            max: MAX_TEAM_MEMBERS,
        });
    }
    Ok(())
}

/// # Errors
///
/// [`RosterError::Leader`] unless exactly one member is leader.
pub fn validate_leader<M: RosterMember>(members: &[M]) -> Result<(), RosterError> {
    let count = members.iter().filter(|m| m.is_leader()).count();
    if count == 1 {
        Ok(())
    } else {
        Err(RosterError::Leader { count })
    }
}

/// Verified members must match the team gender. Unverified members are
/// exempt.
///
/// # Errors
///
/// [`RosterError::GenderMismatch`] naming every offending member.
pub fn validate_gender_consistency<M: RosterMember>(
    team_gender: Gender,
    members: &[M],
) -> Result<(), RosterError> {
    let offending: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| m.verified_gender().is_some_and(|g| g != team_gender))
        .map(|(i, _)| i + 1)
        .collect();
    if offending.is_empty() {
        Ok(())
    } else {
        Err(RosterError::GenderMismatch {
            team_gender,
            members: offending,
        })
    }
}

/// Every entered membership number must have resolved as valid. Pending,
/// invalid, and malformed numbers all block.
///
/// # Errors
///
/// [`RosterError::IncompleteVerification`] naming every blocking member.
pub fn validate_verification_complete<M: RosterMember>(members: &[M]) -> Result<(), RosterError> {
    let blocking: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| m.has_unresolved_membership())
        .map(|(i, _)| i + 1)
        .collect();
    if blocking.is_empty() {
        Ok(())
    } else {
        Err(RosterError::IncompleteVerification { members: blocking })
    }
}

/// Entered membership numbers on a bare payload must at least be
/// well-formed. Empty numbers are fine.
///
/// # Errors
///
/// [`RosterError::IncompleteVerification`] naming every malformed number.
pub fn validate_membership_formats(members: &[NewTeamMember]) -> Result<(), RosterError> {
    let malformed: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            m.membership_number
                .as_deref()
                .is_some_and(|raw| classify(raw) == MembershipInput::Malformed)
        })
        .map(|(i, _)| i + 1)
        .collect();
    if malformed.is_empty() {
        Ok(())
    } else {
        Err(RosterError::IncompleteVerification { members: malformed })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    struct Stub {
        leader: bool,
        gender: Option<Gender>,
        unresolved: bool,
    }

    impl RosterMember for Stub {
        fn is_leader(&self) -> bool {
            self.leader
        }
        fn verified_gender(&self) -> Option<Gender> {
            self.gender
        }
        fn has_unresolved_membership(&self) -> bool {
            self.unresolved
        }
    }

    fn stub(gender: Option<Gender>) -> Stub {
        Stub {
            leader: false,
            gender,
            unresolved: false,
        }
    }

    #[rstest]
    #[case(0, false)]
    #[case(2, false)]
    #[case(3, true)]
    #[case(4, true)]
    #[case(6, true)]
    #[case(7, false)]
    fn count_bounds(#[case] n: usize, #[case] ok: bool) {
        let members: Vec<Stub> = (0..n).map(|_| stub(None)).collect();
        assert_eq!(validate_member_count(&members).is_ok(), ok);
    }

    #[test]
    fn count_error_reports_actual_size() {
        let members: Vec<Stub> = (0..2).map(|_| stub(None)).collect();
        assert_eq!(
            validate_member_count(&members),
            Err(RosterError::RosterSize {
                count: 2,
                min: 3,
                max: 6
            })
        );
    }

    #[rstest]
    #[case(&[false, false, false], Err(RosterError::Leader { count: 0 }))]
    #[case(&[true, false, false], Ok(()))]
    #[case(&[true, true, false], Err(RosterError::Leader { count: 2 }))]
    fn exactly_one_leader(#[case] flags: &[bool], #[case] expected: Result<(), RosterError>) {
        let members: Vec<Stub> = flags
            .iter()
            .map(|&leader| Stub {
                leader,
                gender: None,
                unresolved: false,
            })
            .collect();
        assert_eq!(validate_leader(&members), expected);
    }

    #[test]
    fn gender_mismatch_only_for_verified_members() {
        let members = vec![
            stub(Some(Gender::Male)),
            stub(None),
            stub(Some(Gender::Female)),
            stub(Some(Gender::Male)),
        ];
        assert_eq!(
            validate_gender_consistency(Gender::Female, &members),
            Err(RosterError::GenderMismatch {
                team_gender: Gender::Female,
                members: vec![1, 4],
            })
        );
        assert_eq!(validate_gender_consistency(Gender::Female, &members[1..3]), Ok(()));
    }

    #[test]
    fn unverified_roster_never_mismatches() {
        let members: Vec<Stub> = (0..4).map(|_| stub(None)).collect();
        assert_eq!(validate_gender_consistency(Gender::Male, &members), Ok(()));
    }

    #[test]
    fn unresolved_numbers_block_submission() {
        let mut members: Vec<Stub> = (0..3).map(|_| stub(None)).collect();
        members[2].unresolved = true;
        assert_eq!(
            validate_verification_complete(&members),
            Err(RosterError::IncompleteVerification { members: vec![3] })
        );
    }

    #[test]
    fn bare_payload_members_only_carry_leadership() {
        let member = NewTeamMember {
            full_name: "Ali".into(),
            email: "ali@example.org".into(),
            phone: "05550001122".into(),
            membership_number: Some("1234567".into()),
            is_leader: true,
        };
        assert!(member.is_leader());
        assert_eq!(member.verified_gender(), None);
        assert!(!member.has_unresolved_membership());
    }

    fn payload_member(number: Option<&str>) -> NewTeamMember {
        NewTeamMember {
            full_name: "Sami".into(),
            email: "sami@example.org".into(),
            phone: "05550001122".into(),
            membership_number: number.map(Into::into),
            is_leader: false,
        }
    }

    #[test]
    fn malformed_payload_numbers_are_named() {
        let members = vec![
            payload_member(Some("12")),
            payload_member(None),
            payload_member(Some("  ")),
            payload_member(Some("1234567")),
            payload_member(Some("12345678")),
        ];
        assert_eq!(
            validate_membership_formats(&members),
            Err(RosterError::IncompleteVerification { members: vec![1, 5] })
        );
        assert_eq!(validate_membership_formats(&members[1..4]), Ok(()));
    }
}
