//! pcm_bridge_rs - PCM normalization and real-time render feed library
//!
//! Bridges an upstream source of raw PCM bytes (network stream, file
//! reader, synthesizer) to a host audio callback that pulls fixed-size
//! per-channel blocks on a strict cadence. Incoming chunks are normalized
//! to f32, accumulated, and drained into the host's pre-zeroed output
//! buffers on demand; a starved buffer renders as silence, never as
//! garbage.

mod bridge;
mod codec;
mod error;
mod processor;
mod protocol;
mod stream_buffer;

pub use bridge::{shared_processor, SharedProcessor, StreamBridge, StreamEvent};
pub use codec::InputCodec;
pub use error::StreamError;
pub use processor::StreamProcessor;
pub use protocol::{HostMessage, StreamOptions};
pub use stream_buffer::{StreamBuffer, RENDER_QUANTUM_FRAMES};
