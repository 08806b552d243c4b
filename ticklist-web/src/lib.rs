//! # Ticklist Web Server Library
//!
//! Server-rendered multi-user to-do list. Modules:
//!
//! - `app`: application state, router, session middleware
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `routes`: request handlers (auth + tasks)
//! - `views`: HTML rendering

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod views;
