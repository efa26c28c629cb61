use std::io;
use thiserror::Error;

/// Failures raised while driving nmcli.
///
/// "Nothing there" states (no SSID, no pinned BSSID, no wireless
/// connection during a read) are not errors; they come back as `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// nmcli exited non-zero. Carries its trimmed stderr.
    #[error("{0}")]
    Execution(String),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` did not finish within {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("No active wireless connection found.")]
    NoActiveConnection,
}

pub type Result<T> = std::result::Result<T, Error>;
