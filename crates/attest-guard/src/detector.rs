//! False reset-claim detection.
//!
//! Scans agent output for lifecycle claims and cross-checks them against
//! host-level session verification. Claims with no host evidence behind
//! them are flagged; claims the host can back are discarded from the
//! report entirely.

use serde::{Deserialize, Serialize};

use attest_core::{verify_session_reset, BootError, BootRegistry, SessionVerificationContext};

use crate::patterns::CLAIM_PATTERNS;

/// Outcome of scanning one agent response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDetectionResult {
    pub detected: bool,
    pub extracted_claims: Vec<String>,
}

impl ClaimDetectionResult {
    fn clear() -> Self {
        Self {
            detected: false,
            extracted_claims: Vec::new(),
        }
    }

    fn flagged(claims: Vec<String>) -> Self {
        Self {
            detected: true,
            extracted_claims: claims,
        }
    }
}

/// Detect unbacked reset/new-session/token-count claims in `text`.
///
/// Collects the first match of each pattern, in pattern-definition order.
/// With no matches the result is clear and verification is not consulted
/// at all (an uninitialized registry is fine on that path). With matches,
/// [`verify_session_reset`] decides: a failed verification flags the
/// claims as false; a successful one discards them, yielding the same
/// clear shape as a text with no claims.
pub fn detect_false_reset_claim(
    text: &str,
    registry: &BootRegistry,
    ctx: &SessionVerificationContext,
) -> Result<ClaimDetectionResult, BootError> {
    let claims: Vec<String> = CLAIM_PATTERNS
        .iter()
        .filter_map(|pattern| pattern.first_match(text))
        .map(str::to_string)
        .collect();

    if claims.is_empty() {
        return Ok(ClaimDetectionResult::clear());
    }

    let verification = verify_session_reset(registry, ctx)?;
    if verification.verified {
        Ok(ClaimDetectionResult::clear())
    } else {
        Ok(ClaimDetectionResult::flagged(claims))
    }
}
