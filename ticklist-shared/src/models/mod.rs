/// Database models
///
/// - `user`: user accounts (registration, credential lookup)
/// - `task`: per-user to-do items, every query scoped by owner

pub mod task;
pub mod user;
