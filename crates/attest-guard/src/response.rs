//! Verification responses.
//!
//! Fixed-structure renderings of the boot evidence: the per-session
//! briefing injected into agent context, and the rejection notice sent
//! when an unbacked claim is blocked. Pure string assembly; the only
//! failure mode is an uninitialized registry upstream.

use attest_core::boot::iso_timestamp;
use attest_core::{BootError, BootRegistry, SessionVerificationContext};

/// Canonical command for an actual, host-backed reset.
pub const RESET_COMMAND: &str = "/new";

/// Multi-line verification briefing for system-level injection.
///
/// Embeds the boot identity, the session identity, the standing rules,
/// and the current session status. The `Reset Triggered` line appears
/// only when the context says an explicit reset command was observed.
pub fn format_system_verification_message(
    registry: &BootRegistry,
    ctx: &SessionVerificationContext,
) -> Result<String, BootError> {
    let record = registry.current_record()?;

    let mut lines = vec![
        "# Host Session Verification".to_string(),
        String::new(),
        format!("**Boot ID**: `{}`", record.boot_id),
        format!(
            "**Process**: PID {}, started {}",
            record.pid,
            iso_timestamp(&record.process_start_time)
        ),
        format!("**Session ID**: `{}`", ctx.session_id),
        format!("**Session Key**: `{}`", ctx.session_key),
        String::new(),
        "## Important Rules".to_string(),
        String::new(),
        "1. **Context Reset Claims**: You may ONLY claim a context reset if:".to_string(),
        format!("   - A `{}` command was explicitly used, OR", RESET_COMMAND),
        "   - The Boot ID changes (indicating an actual process restart)".to_string(),
        String::new(),
        "2. **Token Count Claims**: You MUST NOT estimate or report token usage.".to_string(),
        "   - Token tracking is handled at the host level".to_string(),
        "   - Use available tools to query actual usage".to_string(),
        String::new(),
        "3. **Session Persistence**: This session persists across messages.".to_string(),
        "   - The session ID remains the same unless explicitly reset".to_string(),
        "   - Check the Boot ID to verify if the process restarted".to_string(),
        String::new(),
        format!(
            "**Current Status**: {}",
            if ctx.is_new_session {
                "NEW SESSION"
            } else {
                "EXISTING SESSION"
            }
        ),
    ];

    if ctx.reset_triggered {
        lines.push(format!(
            "**Reset Triggered**: YES (explicit {} command)",
            RESET_COMMAND
        ));
    }

    Ok(lines.join("\n"))
}

/// Rejection notice for claims that failed host-level verification.
///
/// Lists each blocked claim quoted, one per line, in input order, then
/// the unchanged boot and session identity, and closes with guidance
/// naming the canonical reset command.
pub fn format_blocked_claim_response(
    claims: &[String],
    registry: &BootRegistry,
    ctx: &SessionVerificationContext,
) -> Result<String, BootError> {
    let record = registry.current_record()?;

    let mut lines = vec![
        "**Operation could not be verified at host level.**".to_string(),
        String::new(),
        "The agent claimed the following operations occurred:".to_string(),
    ];
    lines.extend(claims.iter().map(|claim| format!("- \"{}\"", claim)));
    lines.extend([
        String::new(),
        "However, host-level verification failed:".to_string(),
        format!("- **Boot ID**: `{}` (unchanged)", record.boot_id),
        format!("- **Session ID**: `{}` (unchanged)", ctx.session_id),
        format!(
            "- **Reset Triggered**: {}",
            if ctx.reset_triggered { "Yes" } else { "No" }
        ),
        String::new(),
        "**These operations did not occur at the host level.**".to_string(),
        String::new(),
        format!("To perform an actual reset, use: `{}`", RESET_COMMAND),
    ]);

    Ok(lines.join("\n"))
}
