use serde::Serialize;
use tek_core::entities::MemberIdentity;
use tek_roster::{Resolution, resolve_membership_number};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MemberCommands;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct VerifyResponse {
    number: String,
    status: &'static str,
    member: Option<MemberIdentity>,
}

fn to_response(number: &str, resolution: Option<Resolution>) -> VerifyResponse {
    let (status, member) = match resolution {
        None => ("empty", None),
        Some(Resolution::Invalid) => ("invalid", None),
        Some(Resolution::Valid(identity)) => ("valid", Some(identity)),
    };
    VerifyResponse {
        number: number.trim().to_string(),
        status,
        member,
    }
}

/// Handle `tkf member <subcommand>`.
pub async fn handle(
    action: &MemberCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MemberCommands::Verify(args) => {
            let progress = Progress::spinner("looking up membership number");
            let resolution = resolve_membership_number(ctx.membership(), &args.number).await;
            progress.finish_clear();
            output(&to_response(&args.number, resolution), flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tek_core::enums::Gender;

    use super::*;

    #[test]
    fn valid_resolution_carries_the_member() {
        let identity = MemberIdentity {
            membership_number: "1234567".into(),
            full_name: "Ali Hassan".into(),
            email: "ali@example.org".into(),
            phone: "05550001122".into(),
            gender: Gender::Male,
        };
        let response = to_response(" 1234567 ", Some(Resolution::Valid(identity.clone())));
        assert_eq!(response.number, "1234567");
        assert_eq!(response.status, "valid");
        assert_eq!(response.member, Some(identity));
    }

    #[test]
    fn empty_and_invalid_have_no_member() {
        assert_eq!(to_response("", None).status, "empty");
        let invalid = to_response("12", Some(Resolution::Invalid));
        assert_eq!(invalid.status, "invalid");
        assert!(invalid.member.is_none());
    }
}
