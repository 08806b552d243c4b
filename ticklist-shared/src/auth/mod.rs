/// Authentication primitives
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: signed session tokens and the per-request principal
///
/// Passwords are never stored or compared in plaintext; verification is
/// constant-time. Sessions are HS256-signed tokens bound to a user id and
/// carried by the client in an HttpOnly cookie.

pub mod password;
pub mod session;
