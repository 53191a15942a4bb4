//! Field-level constraints on registration and project payloads.
//!
//! Every check runs and all failures are collected, so a caller can report
//! the whole form at once. Lengths count characters, not bytes.

use std::fmt;

use tek_core::entities::{NewIndividual, NewProjectSubmission, NewTeam, NewTeamMember};
use tek_core::limits::{MIN_PROBLEM_STATEMENT_CHARS, MIN_TECHNICAL_DESCRIPTION_CHARS};

const NAME_CHARS: (usize, usize) = (2, 100);
const PHONE_CHARS: (usize, usize) = (10, 20);
const TITLE_CHARS: (usize, usize) = (5, 200);
const MIN_PROFILE_CHARS: usize = 10;
const MIN_REFERENCE_CHARS: usize = 10;

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `members[2].email`.
    pub field: String,
    pub message: String,
}

/// All failed constraints of one payload, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any error concerns `field`.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "invalid fields: {}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

fn chars(value: &str) -> usize {
    value.trim().chars().count()
}

fn check_range(errors: &mut FieldErrors, field: &str, value: &str, (min, max): (usize, usize)) {
    let n = chars(value);
    if n < min || n > max {
        errors.push(field, format!("must be {min}-{max} characters, got {n}"));
    }
}

fn check_min(errors: &mut FieldErrors, field: &str, value: &str, min: usize) {
    let n = chars(value);
    if n < min {
        errors.push(field, format!("must be at least {min} characters, got {n}"));
    }
}

/// Minimal address shape: one `@`, non-empty local part, dotted domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn check_email(errors: &mut FieldErrors, field: &str, email: &str) {
    if !is_valid_email(email) {
        errors.push(field, "must be a valid email address");
    }
}

fn check_registrant(
    errors: &mut FieldErrors,
    prefix: &str,
    full_name: &str,
    email: &str,
    phone: &str,
) {
    check_range(errors, &format!("{prefix}full_name"), full_name, NAME_CHARS);
    check_email(errors, &format!("{prefix}email"), email);
    check_range(errors, &format!("{prefix}phone"), phone, PHONE_CHARS);
}

fn check_member(errors: &mut FieldErrors, position: usize, member: &NewTeamMember) {
    let prefix = format!("members[{position}].");
    check_registrant(errors, &prefix, &member.full_name, &member.email, &member.phone);
}

fn idea_missing(idea: Option<&str>) -> bool {
    idea.is_none_or(|idea| idea.trim().is_empty())
}

/// Field constraints of a team registration.
///
/// Roster rules (count, leader, gender) are checked by
/// [`crate::validate`]; member positions here are 1-based.
///
/// # Errors
///
/// Returns every failed constraint.
pub fn validate_new_team_fields(team: &NewTeam) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_range(&mut errors, "team_name", &team.team_name, NAME_CHARS);
    if !team.registration_type.is_team() {
        errors.push(
            "registration_type",
            format!("'{}' is not a team registration", team.registration_type),
        );
    }
    if team.registration_type.requires_idea() && idea_missing(team.initial_idea.as_deref()) {
        errors.push("initial_idea", "required for team_with_idea");
    }
    for (i, member) in team.members.iter().enumerate() {
        check_member(&mut errors, i + 1, member);
    }
    errors.into_result()
}

/// Field constraints of an individual registration.
///
/// # Errors
///
/// Returns every failed constraint.
pub fn validate_new_individual(individual: &NewIndividual) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_registrant(
        &mut errors,
        "",
        &individual.full_name,
        &individual.email,
        &individual.phone,
    );
    if !individual.registration_type.is_individual() {
        errors.push(
            "registration_type",
            format!("'{}' is not an individual registration", individual.registration_type),
        );
    }
    check_min(&mut errors, "technical_skills", &individual.technical_skills, MIN_PROFILE_CHARS);
    check_min(&mut errors, "interests", &individual.interests, MIN_PROFILE_CHARS);
    if individual.experience_level.trim().is_empty() {
        errors.push("experience_level", "must not be empty");
    }
    if individual.registration_type.requires_idea()
        && idea_missing(individual.project_idea.as_deref())
    {
        errors.push("project_idea", "required for individual_with_idea");
    }
    errors.into_result()
}

/// Field constraints of a project submission.
///
/// # Errors
///
/// Returns every failed constraint.
pub fn validate_project_submission(project: &NewProjectSubmission) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, "member_email", &project.member_email);
    check_range(&mut errors, "title", &project.title, TITLE_CHARS);
    check_min(
        &mut errors,
        "problem_statement",
        &project.problem_statement,
        MIN_PROBLEM_STATEMENT_CHARS,
    );
    check_min(
        &mut errors,
        "technical_description",
        &project.technical_description,
        MIN_TECHNICAL_DESCRIPTION_CHARS,
    );
    check_min(
        &mut errors,
        "scientific_reference",
        &project.scientific_reference,
        MIN_REFERENCE_CHARS,
    );
    errors.into_result()
}

/// Stored `character_count` of a submission.
#[must_use]
pub fn character_count(technical_description: &str) -> u32 {
    u32::try_from(technical_description.chars().count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tek_core::enums::{Gender, ProjectField, RegistrationType};

    use super::*;

    fn member(name: &str) -> NewTeamMember {
        NewTeamMember {
            full_name: name.into(),
            email: format!("{}@example.org", name.to_lowercase()),
            phone: "05550001122".into(),
            membership_number: None,
            is_leader: false,
        }
    }

    fn team(registration_type: RegistrationType, idea: Option<&str>) -> NewTeam {
        NewTeam {
            team_name: "Falcons".into(),
            registration_type,
            field: ProjectField::Fintech,
            initial_idea: idea.map(Into::into),
            members: vec![member("Ali"), member("Omar"), member("Sami")],
            gender: Gender::Male,
        }
    }

    fn individual(registration_type: RegistrationType) -> NewIndividual {
        NewIndividual {
            registration_type,
            full_name: "Lina Haddad".into(),
            membership_number: None,
            email: "lina@example.org".into(),
            phone: "05550003344".into(),
            technical_skills: "Rust and embedded C".into(),
            interests: "Edge inference on drones".into(),
            experience_level: "intermediate".into(),
            preferred_field: ProjectField::SmartMobility,
            project_idea: None,
            gender: Gender::Female,
        }
    }

    fn project() -> NewProjectSubmission {
        NewProjectSubmission {
            member_email: "ali@example.org".into(),
            title: "Edge triage".into(),
            problem_statement: "p".repeat(MIN_PROBLEM_STATEMENT_CHARS),
            technical_description: "t".repeat(MIN_TECHNICAL_DESCRIPTION_CHARS),
            scientific_reference: "doi:10.1000/xyz".into(),
            field: ProjectField::AiHealthcare,
        }
    }

    #[rstest]
    #[case("ali@example.org", true)]
    #[case("a.b+c@sub.example.co", true)]
    #[case("ali@example", false)]
    #[case("@example.org", false)]
    #[case("ali@@example.org", false)]
    #[case("ali example@x.org", false)]
    #[case("ali@.org", false)]
    fn email_shape(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(is_valid_email(email), ok);
    }

    #[test]
    fn valid_team_passes() {
        assert_eq!(validate_new_team_fields(&team(RegistrationType::TeamNoIdea, None)), Ok(()));
    }

    #[test]
    fn team_with_idea_requires_idea() {
        let errors =
            validate_new_team_fields(&team(RegistrationType::TeamWithIdea, Some("  "))).unwrap_err();
        assert!(errors.has("initial_idea"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn team_rejects_individual_registration_type() {
        let errors =
            validate_new_team_fields(&team(RegistrationType::IndividualNoIdea, None)).unwrap_err();
        assert!(errors.has("registration_type"));
    }

    #[test]
    fn member_errors_use_one_based_positions() {
        let mut t = team(RegistrationType::TeamNoIdea, None);
        t.members[1].email = "broken".into();
        t.members[2].phone = "123".into();
        let errors = validate_new_team_fields(&t).unwrap_err();
        assert!(errors.has("members[2].email"));
        assert!(errors.has("members[3].phone"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn arabic_names_count_characters_not_bytes() {
        let mut t = team(RegistrationType::TeamNoIdea, None);
        // 2 characters, 4 bytes.
        t.members[0].full_name = "عل".into();
        assert_eq!(validate_new_team_fields(&t), Ok(()));
    }

    #[test]
    fn individual_collects_all_failures() {
        let mut ind = individual(RegistrationType::IndividualWithIdea);
        ind.technical_skills = "Rust".into();
        ind.interests = "AI".into();
        let errors = validate_new_individual(&ind).unwrap_err();
        assert!(errors.has("technical_skills"));
        assert!(errors.has("interests"));
        assert!(errors.has("project_idea"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_individual_passes() {
        assert_eq!(validate_new_individual(&individual(RegistrationType::IndividualNoIdea)), Ok(()));
    }

    #[test]
    fn project_at_minimum_lengths_passes() {
        assert_eq!(validate_project_submission(&project()), Ok(()));
    }

    #[test]
    fn short_technical_description_is_rejected() {
        let mut p = project();
        p.technical_description = "t".repeat(MIN_TECHNICAL_DESCRIPTION_CHARS - 1);
        let errors = validate_project_submission(&p).unwrap_err();
        assert!(errors.has("technical_description"));
        assert!(errors.to_string().contains("at least 1000 characters, got 999"));
    }

    #[test]
    fn character_count_uses_chars() {
        assert_eq!(character_count("تقنية"), 5);
    }
}
