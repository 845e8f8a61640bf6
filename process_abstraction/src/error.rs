use std::collections::TryReserveError;

/// Errors raised while importing a log or running discovery
///
/// Finding no further pattern is not an error: the discovery loop simply stops.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The configured maximum number of distinct traces was exceeded
    #[error("trace store capacity exceeded: at most {capacity} distinct traces allowed")]
    CapacityExceeded {
        /// Configured maximum number of distinct traces
        capacity: usize,
    },
    /// Memory for a trace or the trace store could not be reserved
    #[error("resource exhausted: {0}")]
    ResourceExhausted(#[from] TryReserveError),
    /// Reading the log or writing a report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A [`DiscoveryConfig`](crate::DiscoveryConfig) could not be (de-)serialized
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result alias with [`DiscoveryError`] as error type
pub type Result<T> = std::result::Result<T, DiscoveryError>;
