pub mod admin;
pub mod eval;
pub mod individual;
pub mod member;
pub mod project;
pub mod roster;
pub mod team;

pub use admin::AdminCommands;
pub use eval::EvalCommands;
pub use individual::IndividualCommands;
pub use member::MemberCommands;
pub use project::ProjectCommands;
pub use roster::RosterCommands;
pub use team::TeamCommands;
