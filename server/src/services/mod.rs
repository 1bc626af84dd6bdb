//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and store access so route handlers can
//! stay focused on protocol translation (status codes, bodies, headers).

pub mod assets;
pub mod user;
pub mod viewport;
