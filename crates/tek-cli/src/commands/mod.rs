pub mod admin;
pub mod dispatch;
pub mod eval;
pub mod individual;
pub mod member;
pub mod project;
pub mod roster;
pub mod shared;
pub mod team;
