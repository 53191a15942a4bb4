//! Membership number verification through
//! `GET /students/verify-membership-number/{number}`.

use serde::Deserialize;
use tek_core::entities::MemberIdentity;
use tek_core::enums::Gender;
use tek_roster::{LookupOutcome, MembershipLookup};

use crate::{ApiClient, error::ClientError};

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(default)]
    member: Option<MemberRecord>,
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    ar_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    sex: Option<String>,
}

/// Fold a verification response into a lookup outcome.
///
/// An unusable `sex` value makes the record unusable, since the roster
/// cannot check gender consistency without it.
fn to_outcome(number: &str, resp: VerifyResponse) -> LookupOutcome {
    let Some(member) = resp.member.filter(|_| resp.success) else {
        return LookupOutcome::NotFound;
    };
    let sex = member.sex.unwrap_or_default();
    let Some(gender) = Gender::from_membership_sex(&sex) else {
        return LookupOutcome::Failed(format!("unrecognized sex value {sex:?}"));
    };
    LookupOutcome::Found(MemberIdentity {
        membership_number: number.to_string(),
        full_name: member.ar_name.trim().to_string(),
        email: member.email.unwrap_or_default().trim().to_string(),
        phone: member.phone.unwrap_or_default().trim().to_string(),
        gender,
    })
}

impl ApiClient {
    /// Look up a membership number.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure, a non-success status, or an
    /// unparseable body. A well-formed "not a member" answer is
    /// `Ok(LookupOutcome::NotFound)`.
    pub async fn verify_membership_number(
        &self,
        number: &str,
    ) -> Result<LookupOutcome, ClientError> {
        let path = format!(
            "/students/verify-membership-number/{}",
            urlencoding::encode(number)
        );
        let resp: VerifyResponse = self.send(self.get(&path)).await?;
        Ok(to_outcome(number, resp))
    }
}

impl MembershipLookup for ApiClient {
    async fn lookup(&self, number: &str) -> LookupOutcome {
        match self.verify_membership_number(number).await {
            Ok(outcome) => outcome,
            Err(ClientError::NotFound(_)) => LookupOutcome::NotFound,
            Err(error) => LookupOutcome::Failed(error.to_string()),
        }
    }
}
