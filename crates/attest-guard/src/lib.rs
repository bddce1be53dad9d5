//! Attest Guard: False-Claim Detection and Verification Responses
//!
//! Sits between the agent and the session layer. Scans generated text for
//! reset/new-session/token-count claims ([`detect_false_reset_claim`]),
//! cross-checks them against the boot evidence in `attest-core`, and
//! renders the verification briefing and claim-blocked notices.
//!
//! # Example
//!
//! ```
//! use attest_core::{BootRegistry, SessionVerificationContext};
//! use attest_guard::{detect_false_reset_claim, format_blocked_claim_response};
//! use chrono::Utc;
//!
//! let mut registry =
//!     BootRegistry::new().with_log_path(std::env::temp_dir().join("attest-doc-boot.log"));
//! registry.initialize().unwrap();
//!
//! let ctx = SessionVerificationContext::new("sess-1", "key-1", Utc::now());
//! let result = detect_false_reset_claim("The context reset just now.", &registry, &ctx).unwrap();
//!
//! if result.detected {
//!     let notice = format_blocked_claim_response(&result.extracted_claims, &registry, &ctx).unwrap();
//!     println!("{}", notice);
//! }
//! ```

pub mod detector;
pub mod patterns;
pub mod response;

pub use detector::{detect_false_reset_claim, ClaimDetectionResult};
pub use patterns::{ClaimPattern, CLAIM_PATTERNS};
pub use response::{
    format_blocked_claim_response, format_system_verification_message, RESET_COMMAND,
};
