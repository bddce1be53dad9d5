//! Host-level boot identity registry.
//!
//! Generates an unforgeable boot id on process startup that proves an
//! actual restart. Agents cannot claim a context reset unless the host
//! evidence (this registry) backs it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::BootError;

/// Immutable metadata captured once at process startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootRecord {
    /// 128-bit random token, fresh per process lifetime
    pub boot_id: String,
    /// Wall-clock instant the registry was initialized
    pub process_start_time: DateTime<Utc>,
    /// Process identifier
    pub pid: u32,
    /// Host name, or "unknown" when undetectable
    pub hostname: String,
    /// Version of the running service
    pub runtime_version: String,
}

/// Single-owner registry holding the boot identity of this process.
///
/// Constructed once during application bootstrap and passed by reference
/// to every consumer. `initialize` must complete before any reader is
/// handed a reference; `&mut self` on the writer makes that structural.
#[derive(Debug, Default)]
pub struct BootRegistry {
    record: Option<BootRecord>,
    log_path: Option<PathBuf>,
}

impl BootRegistry {
    /// Create an empty, uninitialized registry.
    pub fn new() -> Self {
        Self {
            record: None,
            log_path: None,
        }
    }

    /// Override the boot log destination (the default is `$HOME/.attest/boot.log`)
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Initialize the boot identity.
    ///
    /// Generates a fresh boot id and captures start time, pid, hostname and
    /// runtime version. Appends one line to the boot log, best-effort: an
    /// append failure is downgraded to a warning and never aborts startup.
    ///
    /// Fails with [`BootError::AlreadyInitialized`] on a second call.
    pub fn initialize(&mut self) -> Result<&BootRecord, BootError> {
        if self.record.is_some() {
            return Err(BootError::AlreadyInitialized);
        }

        let record = BootRecord {
            boot_id: Uuid::new_v4().to_string(),
            process_start_time: Utc::now(),
            pid: std::process::id(),
            hostname: detect_hostname(),
            runtime_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        tracing::info!("boot registry initialized with boot id {}", record.boot_id);
        tracing::info!(
            "process: PID={}, started={}",
            record.pid,
            iso_timestamp(&record.process_start_time)
        );

        match self.log_path.clone().or_else(default_log_path) {
            Some(path) => {
                if let Err(err) = append_boot_log(&path, &record) {
                    tracing::warn!("failed to append boot log at {}: {}", path.display(), err);
                }
            }
            None => tracing::warn!("HOME not set; skipping boot log append"),
        }

        Ok(self.record.insert(record))
    }

    /// Current boot id, or [`BootError::NotInitialized`].
    pub fn current_boot_id(&self) -> Result<&str, BootError> {
        self.record
            .as_ref()
            .map(|r| r.boot_id.as_str())
            .ok_or(BootError::NotInitialized)
    }

    /// Full boot record, or [`BootError::NotInitialized`].
    pub fn current_record(&self) -> Result<&BootRecord, BootError> {
        self.record.as_ref().ok_or(BootError::NotInitialized)
    }

    /// True iff the process started strictly after `timestamp`.
    ///
    /// An uninitialized registry reports false: no restart observed.
    pub fn has_restarted_since(&self, timestamp: DateTime<Utc>) -> bool {
        match &self.record {
            Some(record) => record.process_start_time > timestamp,
            None => false,
        }
    }

    /// Time elapsed since process start.
    pub fn uptime(&self) -> Result<chrono::Duration, BootError> {
        let record = self.current_record()?;
        Ok(Utc::now().signed_duration_since(record.process_start_time))
    }

    /// True iff `candidate_id` equals the current boot id exactly.
    ///
    /// No normalization; an uninitialized registry matches nothing.
    pub fn matches(&self, candidate_id: &str) -> bool {
        match &self.record {
            Some(record) => record.boot_id == candidate_id,
            None => false,
        }
    }

    /// One-line summary for system message injection.
    pub fn format_boot_system_message(&self) -> Result<String, BootError> {
        let record = self.current_record()?;
        Ok(format!(
            "Host session verification: BOOT_ID={} (PID={}, started={})",
            record.boot_id,
            record.pid,
            iso_timestamp(&record.process_start_time)
        ))
    }
}

/// Render an instant as ISO-8601 with millisecond precision.
pub fn iso_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn default_log_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".attest").join("boot.log"))
}

fn append_boot_log(path: &Path, record: &BootRecord) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let line = format!(
        "{} | BOOT_ID={} | PID={} | NODE={}\n",
        iso_timestamp(&record.process_start_time),
        record.boot_id,
        record.pid,
        record.runtime_version
    );
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(line.as_bytes())
}

fn detect_hostname() -> String {
    if let Ok(name) = std::env::var("HOSTNAME") {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    std::process::Command::new("hostname")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
