//! Attest Core: Boot Registry and Session Verification
//!
//! Host-level evidence for agent session lifecycles. A [`BootRegistry`] is
//! constructed once at application bootstrap, initialized with a fresh boot
//! id, and passed by reference to every consumer. [`verify_session_reset`]
//! then decides whether a session's "I was reset" claim is backed by that
//! evidence.

pub mod boot;
pub mod error;
pub mod session;

pub use boot::{BootRecord, BootRegistry};
pub use error::BootError;
pub use session::{verify_session_reset, SessionVerificationContext, VerificationResult};

/// Attest engine version
pub const ATTEST_VERSION: &str = "1.0.0";
