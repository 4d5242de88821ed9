use thiserror::Error;

/// Everything that can sink a scan request.
///
/// XML parse failures are deliberately absent: the normalizer recovers them
/// locally into an empty host list (plus a log line) so the caller only ever
/// sees the taxonomy below.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("No target provided")]
    MissingTarget,

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Scan timed out (exceeded {secs} seconds)")]
    Timeout { secs: u64 },

    #[error("Nmap error: exit status {status}: {stderr}")]
    ExecutionFailed { status: String, stderr: String },

    #[error("Failed to launch nmap: {0}")]
    Spawn(#[from] std::io::Error),
}

impl ScanError {
    /// HTTP status the request handler maps this error to.
    pub fn http_status(&self) -> u16 {
        match self {
            ScanError::MissingTarget | ScanError::InvalidTarget(_) => 400,
            ScanError::Timeout { .. } | ScanError::ExecutionFailed { .. } | ScanError::Spawn(_) => {
                500
            }
        }
    }
}
