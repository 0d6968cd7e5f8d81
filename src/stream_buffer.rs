//! Accumulation buffer reconciling irregular PCM chunks with a fixed-size,
//! multi-channel render cadence.

use std::collections::VecDeque;

use crate::error::StreamError;
use crate::protocol::StreamOptions;

/// Number of frames a render host typically requests per callback quantum.
pub const RENDER_QUANTUM_FRAMES: usize = 128;

/// Unbounded buffer of normalized interleaved samples, drained from the
/// front in fixed-size render blocks.
///
/// Chunks of arbitrary size are appended as they arrive; the render host
/// pulls exactly one quantum per callback. The deque gives amortized O(1)
/// push-back and pop-front, so a render call costs time proportional to
/// the quantum, never to the buffered history.
pub struct StreamBuffer {
    options: StreamOptions,
    samples: VecDeque<f32>,
}

impl StreamBuffer {
    /// Create an empty buffer for a validated set of stream options.
    pub fn new(options: StreamOptions) -> Result<Self, StreamError> {
        options.validate()?;
        Ok(Self {
            options,
            samples: VecDeque::new(),
        })
    }

    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// Normalize a raw PCM byte block and append the samples in order.
    pub fn push_raw(&mut self, raw: &[u8]) {
        self.samples
            .extend(self.options.input_codec.normalize(raw));
    }

    /// Whole frames currently buffered.
    pub fn buffered_frames(&self) -> usize {
        self.samples.len() / self.options.channels
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drain buffered frames into per-channel output slices.
    ///
    /// The block size is the output slice length. Up to that many leading
    /// frames are de-interleaved, sample `i * channels + c` landing in
    /// `outputs[c][i]`, and the consumed prefix is dropped. When the
    /// buffer is starved the tail entries are left at the caller's
    /// pre-zeroed values, which renders as silence.
    ///
    /// A call with the wrong number of output channels writes nothing and
    /// leaves the buffer intact.
    ///
    /// Always returns `true`: the stream never terminates from inside the
    /// render path.
    pub fn render(&mut self, outputs: &mut [&mut [f32]]) -> bool {
        let channels = self.options.channels;

        // Channel-count mismatch: write nothing, keep the buffer intact.
        if outputs.len() != channels {
            return true;
        }

        let block = outputs.first().map_or(0, |o| o.len());
        let frames = self.buffered_frames().min(block);

        // Split interleaved → per-channel
        for i in 0..frames {
            for (ch, out) in outputs.iter_mut().enumerate() {
                out[i] = self.samples[i * channels + ch];
            }
        }

        // Remove the consumed frames from the front of the buffer
        self.samples.drain(..frames * channels);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::InputCodec;

    fn float_buffer(channels: usize) -> StreamBuffer {
        StreamBuffer::new(StreamOptions {
            input_codec: InputCodec::Float32,
            channels,
            sample_rate: 48000,
        })
        .unwrap()
    }

    fn f32_bytes(samples: &[f32]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
    }

    fn i16_bytes(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
    }

    #[test]
    fn starved_render_zero_pads_the_tail() {
        let mut buffer = StreamBuffer::new(StreamOptions {
            input_codec: InputCodec::Int16,
            channels: 2,
            sample_rate: 16000,
        })
        .unwrap();

        // 3 interleaved frames
        buffer.push_raw(&i16_bytes(&[100, 200, 300, 400, 500, 600]));

        let mut left = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        let mut right = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        assert!(buffer.render(&mut [&mut left[..], &mut right[..]]));

        assert_eq!(&left[..3], &[100.0 / 32768.0, 300.0 / 32768.0, 500.0 / 32768.0]);
        assert_eq!(&right[..3], &[200.0 / 32768.0, 400.0 / 32768.0, 600.0 / 32768.0]);
        assert!(left[3..].iter().all(|&v| v == 0.0));
        assert!(right[3..].iter().all(|&v| v == 0.0));
        assert!(buffer.is_empty());
    }

    #[test]
    fn exact_block_drains_without_residue() {
        let mut buffer = float_buffer(1);
        let samples: Vec<f32> = (0..RENDER_QUANTUM_FRAMES).map(|i| i as f32).collect();
        buffer.push_raw(&f32_bytes(&samples));

        let mut out = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        buffer.render(&mut [&mut out[..]]);
        assert_eq!(out, samples);
        assert!(buffer.is_empty());

        // A fresh zeroed block stays all zero on the next pull
        let mut out = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        buffer.render(&mut [&mut out[..]]);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn channel_mismatch_is_a_silent_noop() {
        let mut buffer = float_buffer(2);
        buffer.push_raw(&f32_bytes(&[0.1, 0.2, 0.3, 0.4]));

        let mut only = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        assert!(buffer.render(&mut [&mut only[..]]));
        assert!(only.iter().all(|&v| v == 0.0));
        assert_eq!(buffer.buffered_frames(), 2);

        // A correctly shaped call afterwards still sees everything
        let mut left = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        let mut right = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        buffer.render(&mut [&mut left[..], &mut right[..]]);
        assert_eq!(&left[..2], &[0.1, 0.3]);
        assert_eq!(&right[..2], &[0.2, 0.4]);
    }

    #[test]
    fn partial_render_resumes_where_it_stopped() {
        let mut buffer = float_buffer(2);
        let samples: Vec<f32> = (0..400).map(|i| i as f32 / 400.0).collect();
        buffer.push_raw(&f32_bytes(&samples));
        assert_eq!(buffer.buffered_frames(), 200);

        let mut left = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        let mut right = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        buffer.render(&mut [&mut left[..], &mut right[..]]);
        assert_eq!(left[0], samples[0]);
        assert_eq!(right[0], samples[1]);
        assert_eq!(left[127], samples[254]);
        assert_eq!(right[127], samples[255]);
        assert_eq!(buffer.buffered_frames(), 72);

        let mut left = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        let mut right = vec![0.0f32; RENDER_QUANTUM_FRAMES];
        buffer.render(&mut [&mut left[..], &mut right[..]]);
        assert_eq!(left[0], samples[256]);
        assert_eq!(right[71], samples[399]);
        assert!(left[72..].iter().all(|&v| v == 0.0));
        assert!(right[72..].iter().all(|&v| v == 0.0));
        assert!(buffer.is_empty());
    }

    #[test]
    fn appended_chunks_drain_in_order() {
        let mut buffer = float_buffer(1);
        let a = [0.1f32, 0.2, 0.3];
        let b = [0.4f32, 0.5];
        buffer.push_raw(&f32_bytes(&a));
        buffer.push_raw(&f32_bytes(&b));

        let mut out = vec![0.0f32; 8];
        buffer.render(&mut [&mut out[..]]);
        assert_eq!(&out[..5], &[0.1, 0.2, 0.3, 0.4, 0.5]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn dangling_sample_waits_for_its_frame() {
        let mut buffer = float_buffer(2);
        // 5 samples = 2 whole frames + 1 dangling sample
        buffer.push_raw(&f32_bytes(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(buffer.buffered_frames(), 2);

        let mut left = vec![0.0f32; 4];
        let mut right = vec![0.0f32; 4];
        buffer.render(&mut [&mut left[..], &mut right[..]]);
        assert_eq!(&left[..2], &[1.0, 3.0]);
        assert_eq!(&right[..2], &[2.0, 4.0]);

        // The dangling sample pairs up with the next chunk
        buffer.push_raw(&f32_bytes(&[6.0]));
        let mut left = vec![0.0f32; 4];
        let mut right = vec![0.0f32; 4];
        buffer.render(&mut [&mut left[..], &mut right[..]]);
        assert_eq!(left[0], 5.0);
        assert_eq!(right[0], 6.0);
        assert!(buffer.is_empty());
    }
}
