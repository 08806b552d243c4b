/// Database access
///
/// - [`pool`]: PostgreSQL connection pool with explicit lifecycle
/// - [`migrations`]: schema migration runner

pub mod migrations;
pub mod pool;
