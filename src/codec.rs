//! PCM input codec definitions and sample normalization.
//!
//! Incoming byte blocks are reinterpreted as fixed-width samples in the
//! platform's native byte order and scaled to f32 for the render path.

use serde::{Deserialize, Serialize};

/// Fixed-width linear PCM encodings accepted on the feed path.
///
/// The serde tag set is closed: any other string in an `OPTIONS` message
/// fails deserialization at configure time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCodec {
    Int8,
    Int16,
    Int32,
    Float32,
}

impl InputCodec {
    /// Width of one sample in bytes.
    pub fn sample_width(self) -> usize {
        match self {
            InputCodec::Int8 => 1,
            InputCodec::Int16 => 2,
            InputCodec::Int32 | InputCodec::Float32 => 4,
        }
    }

    /// Full-scale divisor: the magnitude of the most negative representable
    /// value, so that value maps to exactly -1.0. The most positive value
    /// lands slightly below 1.0 (no symmetric rescale).
    pub fn full_scale(self) -> f64 {
        match self {
            InputCodec::Int8 => 128.0,
            InputCodec::Int16 => 32768.0,
            InputCodec::Int32 => 2_147_483_648.0,
            InputCodec::Float32 => 1.0,
        }
    }

    /// Convert a raw byte block into normalized f32 samples.
    ///
    /// Trailing bytes that do not form a whole sample are ignored.
    /// Integer samples are divided in f64 before the f32 store; Float32
    /// input passes through unchanged.
    pub fn normalize(self, raw: &[u8]) -> Vec<f32> {
        let scale = self.full_scale();
        match self {
            InputCodec::Int8 => raw
                .iter()
                .map(|&b| (f64::from(b as i8) / scale) as f32)
                .collect(),
            InputCodec::Int16 => raw
                .chunks_exact(2)
                .map(|b| (f64::from(i16::from_ne_bytes([b[0], b[1]])) / scale) as f32)
                .collect(),
            InputCodec::Int32 => raw
                .chunks_exact(4)
                .map(|b| {
                    (f64::from(i32::from_ne_bytes([b[0], b[1], b[2], b[3]])) / scale) as f32
                })
                .collect(),
            InputCodec::Float32 => raw
                .chunks_exact(4)
                .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        }
    }
}
