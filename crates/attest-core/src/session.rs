//! Session-level reset verification.
//!
//! Judges "new session" and "context reset" claims against the host
//! evidence held by the boot registry. The policy trusts explicit signals
//! over inferred ones: a user-triggered reset always wins, even when the
//! supplied timestamps contradict it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::boot::BootRegistry;
use crate::error::BootError;

/// Lifecycle facts a session claims about itself.
///
/// Supplied per verification call by the session layer; never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionVerificationContext {
    pub session_id: String,
    pub session_key: String,
    pub session_created_at: DateTime<Utc>,
    pub is_new_session: bool,
    pub reset_triggered: bool,
}

impl SessionVerificationContext {
    /// Create a context for an existing session with no reset claim.
    pub fn new(
        session_id: impl Into<String>,
        session_key: impl Into<String>,
        session_created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            session_key: session_key.into(),
            session_created_at,
            is_new_session: false,
            reset_triggered: false,
        }
    }

    /// Mark the session as newly created.
    pub fn new_session(mut self) -> Self {
        self.is_new_session = true;
        self
    }

    /// Mark that an explicit reset command was observed.
    pub fn reset_triggered(mut self) -> Self {
        self.reset_triggered = true;
        self
    }
}

/// Outcome of a reset-claim verification.
///
/// Always carries the boot id for correlation. `evidence` is non-empty
/// exactly when the claim verified; `reason` is present exactly when it
/// did not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub boot_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
}

impl VerificationResult {
    fn verified(boot_id: impl Into<String>, evidence: impl Into<String>) -> Self {
        Self {
            verified: true,
            reason: None,
            boot_id: boot_id.into(),
            evidence: vec![evidence.into()],
        }
    }

    fn rejected(boot_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            verified: false,
            reason: Some(reason.into()),
            boot_id: boot_id.into(),
            evidence: Vec::new(),
        }
    }
}

/// Verify whether a claimed session reset is backed by host evidence.
///
/// Evaluated in strict order, first match wins:
///
/// 1. an explicit reset command was observed
/// 2. the session is new and was created after the current boot
/// 3. the process restarted since the session was created
///
/// Anything else is rejected. Propagates [`BootError::NotInitialized`]
/// when the registry has no record yet.
pub fn verify_session_reset(
    registry: &BootRegistry,
    ctx: &SessionVerificationContext,
) -> Result<VerificationResult, BootError> {
    let record = registry.current_record()?;

    if ctx.reset_triggered {
        return Ok(VerificationResult::verified(
            &record.boot_id,
            "explicit reset command observed (/new)",
        ));
    }

    if ctx.is_new_session && ctx.session_created_at >= record.process_start_time {
        return Ok(VerificationResult::verified(
            &record.boot_id,
            "session created after current boot",
        ));
    }

    if registry.has_restarted_since(ctx.session_created_at) {
        return Ok(VerificationResult::verified(
            &record.boot_id,
            "process restarted since session creation",
        ));
    }

    Ok(VerificationResult::rejected(
        &record.boot_id,
        "no host-level evidence for claimed reset; session persists across restarts",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn booted_registry() -> (BootRegistry, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = BootRegistry::new().with_log_path(dir.path().join("boot.log"));
        registry.initialize().unwrap();
        (registry, dir)
    }

    #[test]
    fn test_reset_trigger_always_wins() {
        let (registry, _dir) = booted_registry();
        let boot_id = registry.current_boot_id().unwrap().to_string();

        // Contradictory timestamps: session claims creation long before boot
        let ctx = SessionVerificationContext::new(
            "sess-1",
            "key-1",
            Utc::now() - Duration::days(365),
        )
        .reset_triggered();

        let result = verify_session_reset(&registry, &ctx).unwrap();
        assert!(result.verified);
        assert_eq!(result.boot_id, boot_id);
        assert_eq!(result.evidence.len(), 1);
        assert!(result.evidence[0].contains("explicit reset command"));
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_new_session_after_boot_verifies() {
        let (registry, _dir) = booted_registry();

        let ctx = SessionVerificationContext::new("sess-2", "key-2", Utc::now()).new_session();

        let result = verify_session_reset(&registry, &ctx).unwrap();
        assert!(result.verified);
        assert!(result.evidence[0].contains("created after current boot"));
    }

    #[test]
    fn test_restart_since_session_creation_verifies() {
        let (registry, _dir) = booted_registry();

        // Existing session created before this process started
        let ctx =
            SessionVerificationContext::new("sess-3", "key-3", Utc::now() - Duration::hours(2));

        let result = verify_session_reset(&registry, &ctx).unwrap();
        assert!(result.verified);
        assert!(result.evidence[0].contains("restarted since session creation"));
    }

    #[test]
    fn test_existing_session_after_boot_is_rejected() {
        let (registry, _dir) = booted_registry();

        // Created after boot but not flagged new, no reset trigger: no path grants it
        let ctx = SessionVerificationContext::new(
            "sess-4",
            "key-4",
            Utc::now() + Duration::seconds(1),
        );

        let result = verify_session_reset(&registry, &ctx).unwrap();
        assert!(!result.verified);
        assert!(result.evidence.is_empty());
        let reason = result.reason.unwrap();
        assert!(reason.contains("no host-level evidence"));
    }

    #[test]
    fn test_new_session_created_before_boot_falls_through_to_restart() {
        let (registry, _dir) = booted_registry();

        // Flagged new but created before boot: rule 2 fails, rule 3 catches it
        let ctx =
            SessionVerificationContext::new("sess-5", "key-5", Utc::now() - Duration::hours(1))
                .new_session();

        let result = verify_session_reset(&registry, &ctx).unwrap();
        assert!(result.verified);
        assert!(result.evidence[0].contains("restarted since session creation"));
    }

    #[test]
    fn test_uninitialized_registry_propagates() {
        let registry = BootRegistry::new();
        let ctx = SessionVerificationContext::new("sess-6", "key-6", Utc::now());

        assert_eq!(
            verify_session_reset(&registry, &ctx).unwrap_err(),
            BootError::NotInitialized
        );
    }

    #[test]
    fn test_result_serialization_shape() {
        let (registry, _dir) = booted_registry();

        let verified = verify_session_reset(
            &registry,
            &SessionVerificationContext::new("s", "k", Utc::now()).reset_triggered(),
        )
        .unwrap();
        let json = serde_json::to_value(&verified).unwrap();
        assert!(json.get("reason").is_none());
        assert_eq!(json["evidence"].as_array().unwrap().len(), 1);

        let rejected = verify_session_reset(
            &registry,
            &SessionVerificationContext::new("s", "k", Utc::now() + Duration::seconds(1)),
        )
        .unwrap();
        let json = serde_json::to_value(&rejected).unwrap();
        assert!(json.get("reason").is_some());
        assert!(json.get("evidence").is_none());
    }
}
