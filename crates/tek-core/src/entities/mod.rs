//! Entity structs for all Teknofest domain objects.
//!
//! Each stored entity maps to a table in the local libSQL store and to a
//! response body of the REST API. `New*` structs are the request payloads
//! used to create them. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod admin;
mod evaluation;
mod individual;
mod member;
mod project;
mod team;

pub use admin::{Admin, NewAdmin};
pub use evaluation::{AiEvaluationRequest, Evaluation, NewAdminEvaluation};
pub use individual::{Individual, NewIndividual};
pub use member::{MemberIdentity, NewTeamMember, TeamMember};
pub use project::{AttachmentKind, NewProjectSubmission, ProjectSubmission};
pub use team::{NewTeam, Team, TeamWithSpace, TeamWithSpaceMember};
