//! Session dispatch: applies host control messages and drives the active
//! stream buffer.

use crate::error::StreamError;
use crate::protocol::{HostMessage, StreamOptions};
use crate::stream_buffer::StreamBuffer;

/// Owns the active stream session and routes host messages to it.
///
/// An `OPTIONS` message replaces the session wholesale; samples buffered
/// by the previous session are discarded. PCM data before the first
/// `OPTIONS` is rejected, while rendering before configuration simply
/// leaves the outputs untouched.
#[derive(Default)]
pub struct StreamProcessor {
    session: Option<StreamBuffer>,
}

impl StreamProcessor {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Replace the active session with a freshly configured one.
    pub fn configure(&mut self, options: StreamOptions) -> Result<(), StreamError> {
        let session = StreamBuffer::new(options)?;

        if let Some(old) = self.session.as_ref() {
            if !old.is_empty() {
                log::warn!(
                    "Reconfiguring with {} frames still buffered, discarding",
                    old.buffered_frames(),
                );
            }
        }

        let options = session.options();
        log::info!(
            "Stream configured: codec={:?}, channels={}, rate={}Hz",
            options.input_codec,
            options.channels,
            options.sample_rate,
        );

        self.session = Some(session);
        Ok(())
    }

    /// Normalize a raw PCM chunk and append it to the session buffer.
    pub fn feed(&mut self, raw: &[u8]) -> Result<(), StreamError> {
        let session = self.session.as_mut().ok_or(StreamError::NotConfigured)?;
        session.push_raw(raw);
        Ok(())
    }

    /// Handle one JSON control message from the host.
    ///
    /// `OPTIONS` configures or reconfigures the stream; anything else is
    /// ignored. Unparseable payloads inside an `OPTIONS` message surface
    /// as [`StreamError::InvalidConfiguration`] before any data is
    /// accepted.
    pub fn handle_control(&mut self, text: &str) -> Result<(), StreamError> {
        let msg: HostMessage = match serde_json::from_str(text) {
            Ok(msg) => msg,
            Err(err) => {
                // Not a control envelope, ignore
                log::debug!("Ignoring unparseable control message: {}", err);
                return Ok(());
            }
        };

        match msg.msg_type.as_str() {
            "OPTIONS" => {
                let value = msg.options.ok_or_else(|| {
                    StreamError::InvalidConfiguration("OPTIONS message carries no options".into())
                })?;
                let options: StreamOptions = serde_json::from_value(value)
                    .map_err(|err| StreamError::InvalidConfiguration(err.to_string()))?;
                self.configure(options)
            }
            other => {
                log::debug!("Ignoring control message type: {}", other);
                Ok(())
            }
        }
    }

    /// Render one output quantum from the session buffer.
    ///
    /// Without an active session the outputs are left untouched, which
    /// with pre-zeroed buffers plays silence.
    pub fn render(&mut self, outputs: &mut [&mut [f32]]) -> bool {
        match self.session.as_mut() {
            Some(session) => session.render(outputs),
            None => true,
        }
    }

    /// Options of the active session, if configured.
    pub fn options(&self) -> Option<&StreamOptions> {
        self.session.as_ref().map(|s| s.options())
    }
}
