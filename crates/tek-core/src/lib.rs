//! # tek-core
//!
//! Core types, limits, and error types shared by every Teknofest crate.
//!
//! This crate provides:
//! - Entity structs for registrants, teams, individuals, projects,
//!   evaluations, and admins, plus the payloads used to create them
//! - Closed enums (gender, registration type, competition field, field source,
//!   score status)
//! - Domain limits (roster bounds, membership number length, score ranges)
//! - Cross-cutting error types
//! - Response types returned by the API and rendered by `tkf`

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod limits;
pub mod responses;

mod weight;
