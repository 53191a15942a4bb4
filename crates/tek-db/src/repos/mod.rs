//! Repository modules implementing store operations.
//!
//! Each module adds methods to `TekService` via `impl TekService` blocks.

pub mod admin;
pub mod evaluation;
pub mod individual;
pub mod leaderboard;
pub mod project;
pub mod team;
