/// Request handlers, organized by concern
///
/// - `health`: liveness probe
/// - `auth`: registration, login, logout
/// - `tasks`: the owner-scoped task operations

pub mod auth;
pub mod health;
pub mod tasks;
