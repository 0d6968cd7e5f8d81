//! Feed-side bridge between the host transport and a shared processor.
//!
//! The host's transport task pushes [`StreamEvent`]s into an mpsc channel;
//! the bridge drains them onto a [`StreamProcessor`] shared with the render
//! callback. Control and state errors are fatal to the feed and surface to
//! the host; the render path is untouched by them.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use bytes::Bytes;
use tokio::sync::mpsc;

use crate::processor::StreamProcessor;

/// Events delivered by the host transport.
#[derive(Debug)]
pub enum StreamEvent {
    /// JSON control message, e.g. `{"type":"OPTIONS","options":{...}}`
    Control(String),
    /// Raw PCM payload of a `PCM_RAW_BUFFER` message
    PcmChunk(Bytes),
}

/// Processor handle shared between the feed task and the render callback.
///
/// The core itself is single-threaded; the mutex is the concession to
/// hosts whose transport task and audio callback run on different threads.
pub type SharedProcessor = Arc<Mutex<StreamProcessor>>;

/// Create a processor handle ready to be shared with a render callback.
pub fn shared_processor() -> SharedProcessor {
    Arc::new(Mutex::new(StreamProcessor::new()))
}

pub struct StreamBridge {
    rx: mpsc::Receiver<StreamEvent>,
    processor: SharedProcessor,
}

impl StreamBridge {
    pub fn new(rx: mpsc::Receiver<StreamEvent>, processor: SharedProcessor) -> Self {
        Self { rx, processor }
    }

    /// Drain host events until the sender side closes.
    pub async fn run(mut self) -> Result<()> {
        while let Some(event) = self.rx.recv().await {
            // A poisoned lock still holds a valid buffer, keep going
            let mut processor = self
                .processor
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            match event {
                StreamEvent::Control(text) => {
                    if let Err(e) = processor.handle_control(&text) {
                        log::error!("Control message rejected: {}", e);
                        return Err(e.into());
                    }
                }
                StreamEvent::PcmChunk(data) => {
                    if let Err(e) = processor.feed(&data) {
                        log::error!("PCM chunk rejected: {}", e);
                        return Err(e.into());
                    }
                }
            }
        }

        log::info!("Stream feed channel closed");
        Ok(())
    }
}
