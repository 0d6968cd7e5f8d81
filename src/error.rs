use thiserror::Error;

/// Errors surfaced on the control path.
///
/// The render path never fails: channel-count mismatch, truncated input,
/// and buffer starvation are all silent by design so the real-time
/// callback keeps running.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("invalid stream configuration: {0}")]
    InvalidConfiguration(String),

    #[error("pcm data received before stream configuration")]
    NotConfigured,
}
