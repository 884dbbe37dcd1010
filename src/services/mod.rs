//! Account services used by the CLI.
//!
//! ARCHITECTURE
//! ============
//! Service modules own form rules and multi-step account flows so the CLI
//! layer stays focused on argument parsing and output. Backends are passed
//! in as trait objects.

pub mod account;
pub mod validate;
