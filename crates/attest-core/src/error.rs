//! Unified Error Model
use thiserror::Error;

/// Lifecycle-ordering failures around the boot registry.
///
/// Both variants are programmer errors: the calling operation cannot
/// recover locally and must abort.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    #[error("BOOT/ALREADY_INITIALIZED: boot registry may only be initialized once per process")]
    AlreadyInitialized,

    #[error("BOOT/NOT_INITIALIZED: boot registry read before initialize()")]
    NotInitialized,
}
