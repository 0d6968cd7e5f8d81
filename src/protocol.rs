//! Control-plane message types exchanged with the host.

use serde::{Deserialize, Serialize};

use crate::codec::InputCodec;
use crate::error::StreamError;

/// Stream session parameters carried by an `OPTIONS` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamOptions {
    pub input_codec: InputCodec,
    /// Number of interleaved channels in both input and output.
    pub channels: usize,
    /// Carried for the host's information; the core neither resamples nor
    /// otherwise consumes it.
    pub sample_rate: u32,
}

impl StreamOptions {
    /// Reject parameter combinations the stream cannot operate with.
    pub fn validate(&self) -> Result<(), StreamError> {
        if self.channels == 0 {
            return Err(StreamError::InvalidConfiguration(
                "channels must be at least 1".into(),
            ));
        }
        if self.sample_rate == 0 {
            return Err(StreamError::InvalidConfiguration(
                "sample rate must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            input_codec: InputCodec::Int16,
            channels: 1,
            sample_rate: 8000,
        }
    }
}

/// Inbound control message envelope.
///
/// The `options` payload stays untyped until the `OPTIONS` arm parses it,
/// so messages of other types pass through without deserialization errors.
/// Raw PCM payloads arrive out-of-band as binary data, not in this
/// envelope (see [`StreamEvent`](crate::StreamEvent)).
#[derive(Debug, Deserialize)]
pub struct HostMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub options: Option<serde_json::Value>,
}
