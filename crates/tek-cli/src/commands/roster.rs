use anyhow::Context;
use serde::Serialize;
use tek_core::entities::NewTeam;
use tek_core::enums::{FieldSource, Gender};
use tek_roster::{RosterSession, VerificationStatus, VerifyReport};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RosterCommands;
use crate::commands::shared::parse::read_json;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct MemberReport {
    position: usize,
    full_name: String,
    membership_number: Option<String>,
    is_leader: bool,
    source: FieldSource,
    verification: &'static str,
}

#[derive(Debug, Serialize)]
struct RosterReport {
    team_name: String,
    gender: Gender,
    members: Vec<MemberReport>,
    ready: bool,
    problem: Option<String>,
    discarded_lookups: usize,
}

const fn status_label(status: &VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Empty => "none",
        VerificationStatus::Pending => "pending",
        VerificationStatus::Valid(_) => "valid",
        VerificationStatus::Invalid => "invalid",
    }
}

fn report(session: &RosterSession, verify: VerifyReport) -> RosterReport {
    let draft = session.to_new_team();
    let problem = session.validate().err().map(|e| e.to_string());
    RosterReport {
        team_name: draft.team_name,
        gender: draft.gender,
        members: session
            .members()
            .iter()
            .enumerate()
            .map(|(i, slot)| MemberReport {
                position: i + 1,
                full_name: slot.draft().full_name.clone(),
                membership_number: slot.draft().membership_number.clone(),
                is_leader: slot.draft().is_leader,
                source: slot.source(),
                verification: status_label(slot.status()),
            })
            .collect(),
        ready: problem.is_none(),
        problem,
        discarded_lookups: verify.stale + verify.skipped,
    }
}

/// Load a draft into a session and verify every membership number in it.
pub(crate) async fn verify_draft(
    ctx: &AppContext,
    draft: NewTeam,
) -> anyhow::Result<(RosterSession, VerifyReport)> {
    let (mut session, tickets) =
        RosterSession::from_draft(draft).context("draft cannot be loaded")?;
    if tickets.is_empty() {
        return Ok((session, VerifyReport::default()));
    }

    let progress = Progress::spinner(&format!("verifying {} membership numbers", tickets.len()));
    let verify = ctx.verifier().verify_all(&mut session, tickets).await;
    progress.finish_clear();
    tracing::debug!(?verify, "draft verified");
    Ok((session, verify))
}

/// Handle `tkf roster <subcommand>`.
pub async fn handle(
    action: &RosterCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RosterCommands::Check(args) => {
            let draft: NewTeam = read_json(&args.draft)?;
            let (session, verify) = verify_draft(ctx, draft).await?;
            output(&report(&session, verify), flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tek_core::entities::NewTeamMember;
    use tek_core::enums::{ProjectField, RegistrationType};

    use super::*;

    fn member(name: &str, leader: bool) -> NewTeamMember {
        NewTeamMember {
            full_name: name.into(),
            email: format!("{}@example.org", name.to_lowercase()),
            phone: "05550001122".into(),
            membership_number: None,
            is_leader: leader,
        }
    }

    fn draft(members: Vec<NewTeamMember>) -> NewTeam {
        NewTeam {
            team_name: "Falcons".into(),
            registration_type: RegistrationType::TeamNoIdea,
            field: ProjectField::EnvironmentEnergy,
            initial_idea: None,
            members,
            gender: Gender::Male,
        }
    }

    #[test]
    fn manual_roster_is_ready() {
        let (session, tickets) = RosterSession::from_draft(draft(vec![
            member("Ali", true),
            member("Omar", false),
            member("Sami", false),
        ]))
        .expect("load");
        assert!(tickets.is_empty());

        let report = report(&session, VerifyReport::default());
        assert!(report.ready);
        assert_eq!(report.members.len(), 3);
        assert_eq!(report.members[0].verification, "none");
        assert!(report.members[0].is_leader);
    }

    #[test]
    fn pending_lookup_blocks_the_roster() {
        let mut pending = member("Omar", false);
        pending.membership_number = Some("1234567".into());
        let (session, tickets) = RosterSession::from_draft(draft(vec![
            member("Ali", true),
            pending,
            member("Sami", false),
        ]))
        .expect("load");
        assert_eq!(tickets.len(), 1);

        let report = report(
            &session,
            VerifyReport {
                applied: 0,
                stale: 1,
                skipped: 1,
            },
        );
        assert!(!report.ready);
        assert!(report.problem.is_some());
        assert_eq!(report.members[1].verification, "pending");
        assert_eq!(report.members[1].membership_number.as_deref(), Some("1234567"));
        assert_eq!(report.discarded_lookups, 2);
    }
}
