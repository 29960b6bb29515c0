use thiserror::Error;

use crate::layout::NUMBER_OF_NOTES;

// One descriptor per note slot, laid out by the firmware compiler with
// natural alignment. The stride and per-field offsets are fixed here as an
// explicit table instead of relying on any particular #[repr] producing the
// same padding.
pub const RECORD_STRIDE: usize = 24;

const START_POINTER_OFFSET: usize = 0;
const CURRENT_INDEX_OFFSET: usize = 4;
const AREA_SIZE_OFFSET: usize = 6;
const OCTAVE_COEFF_OFFSET: usize = 8;
// bytes 10..12 are alignment padding
const CURRENT_VOLUME_OFFSET: usize = 12;
const PHASE_POLARIZATION_OFFSET: usize = 16;
const FREQUENCY_OFFSET: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveformRecord {
    pub start_pointer: i32,
    pub current_index: u16,
    pub area_size: u16,
    pub octave_coefficient: u16,
    pub current_volume: i32,
    pub phase_polarization: i32,
    pub frequency: f32,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("dump truncated: {got} bytes, but the record array needs {needed}")]
    TruncatedInput { needed: usize, got: usize },
}

/// The whole dump: a record array followed by raw 16-bit samples, sharing one
/// buffer. Records are decoded eagerly (all or nothing), samples are read on
/// demand through `sample`.
#[derive(Debug)]
pub struct WaveDump {
    records: Vec<WaveformRecord>,
    buffer: Vec<u8>,
}

impl WaveDump {
    pub fn decode(buffer: Vec<u8>) -> Result<WaveDump, DecodeError> {
        let needed = NUMBER_OF_NOTES * RECORD_STRIDE;
        if buffer.len() < needed {
            return Err(DecodeError::TruncatedInput {
                needed,
                got: buffer.len(),
            });
        }
        let records = buffer[..needed]
            .chunks_exact(RECORD_STRIDE)
            .map(decode_record)
            .collect();
        Ok(WaveDump { records, buffer })
    }

    pub fn records(&self) -> &[WaveformRecord] {
        &self.records
    }

    /// Reads the 16-bit sample at the given index, counted from the start of
    /// the buffer (the record array occupies the first
    /// `START_UNITARY_WAVEFORM_OFFSET` sample slots, see layout.rs).
    ///
    /// The combine rule is deliberately asymmetric: low byte unsigned, high
    /// byte sign-extended *before* the shift. Kept bit for bit for
    /// compatibility with the dumps as written, even though it looks more
    /// like a mixed-cast accident than an intentional codec.
    pub fn sample(&self, index: i64) -> Option<i32> {
        if index < 0 {
            return None;
        }
        let base = (index as usize).checked_mul(2)?;
        let lo = *self.buffer.get(base)?;
        let hi = *self.buffer.get(base + 1)?;
        Some(((hi as i8 as i32) << 8) | lo as i32)
    }
}

fn decode_record(raw: &[u8]) -> WaveformRecord {
    WaveformRecord {
        start_pointer: i32_at(raw, START_POINTER_OFFSET),
        current_index: u16_at(raw, CURRENT_INDEX_OFFSET),
        area_size: u16_at(raw, AREA_SIZE_OFFSET),
        octave_coefficient: u16_at(raw, OCTAVE_COEFF_OFFSET),
        current_volume: i32_at(raw, CURRENT_VOLUME_OFFSET),
        phase_polarization: i32_at(raw, PHASE_POLARIZATION_OFFSET),
        frequency: f32_at(raw, FREQUENCY_OFFSET),
    }
}

fn f32_at(raw: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([raw[offset], raw[offset + 1], raw[offset + 2], raw[offset + 3]])
}

fn i32_at(raw: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([raw[offset], raw[offset + 1], raw[offset + 2], raw[offset + 3]])
}

fn u16_at(raw: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([raw[offset], raw[offset + 1]])
}
