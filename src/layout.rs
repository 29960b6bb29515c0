use thiserror::Error;

use crate::dump::{WaveformRecord, RECORD_STRIDE};

// Scanner geometry, fixed at compile time.
pub const CIS_ACTIVE_PIXELS_PER_LINE: usize = 576;
pub const CIS_ADC_OUT_LINES: usize = 3;
pub const PIXELS_PER_NOTE: usize = 16;
pub const NUMBER_OF_NOTES: usize =
    CIS_ACTIVE_PIXELS_PER_LINE * CIS_ADC_OUT_LINES / PIXELS_PER_NOTE;
const _: () = assert!(
    CIS_ACTIVE_PIXELS_PER_LINE * CIS_ADC_OUT_LINES % PIXELS_PER_NOTE == 0,
    "pixels per scan must divide evenly into notes"
);

// Base addresses of the wave table and the unitary waveform region in the
// firmware memory image. The dump starts at the wave table, so addresses are
// turned into buffer positions by subtracting STM32_START_WAVES_ADDR.
pub const STM32_START_WAVES_ADDR: i64 = 0x2400_1270;
pub const STM32_START_UNITARY_WAVEFORM_ADDR: i64 = 0x2400_1C90;
/// Sample index (bytes / 2, counted from the start of the dump) where the
/// unitary waveform region begins.
pub const START_UNITARY_WAVEFORM_OFFSET: i64 =
    (STM32_START_UNITARY_WAVEFORM_ADDR - STM32_START_WAVES_ADDR) / 2;
// The record array must fill the gap between the two base addresses exactly,
// otherwise sample reads would land inside the records.
const _: () =
    assert!(START_UNITARY_WAVEFORM_OFFSET as usize * 2 == NUMBER_OF_NOTES * RECORD_STRIDE);

pub const IMAGE_HEIGHT: u32 = 1000;
pub const IMAGE_WAVEFORMS_SCALE: f64 = 0.8;

pub const TEXT_POSITION: i32 = 10;
pub const WAVES_POSITION: i32 = IMAGE_HEIGHT as i32 / 2 + 60;
pub const OCTAVE_BAND_STEP: i32 = 60;
pub const LABEL_LINE_STEP: i32 = 10;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("computed canvas width {0} is not drawable")]
    InvalidWidth(i64),
}

/// Horizontal geometry derived from the decoded records: the canvas width and
/// one pixel offset per note.
#[derive(Debug)]
pub struct Layout {
    pub canvas_width: u32,
    note_offsets: Vec<i64>,
}

impl Layout {
    pub fn from_records(records: &[WaveformRecord]) -> Result<Layout, LayoutError> {
        let last = records.last().ok_or(LayoutError::InvalidWidth(0))?;
        // +2 columns of slack after the last note. A width that comes out
        // too small clips the trailing trace instead of erroring.
        let width = note_offset_of(last) + last.area_size as i64 + 2;
        if width <= 0 || width > u32::MAX as i64 {
            return Err(LayoutError::InvalidWidth(width));
        }
        Ok(Layout {
            canvas_width: width as u32,
            note_offsets: records.iter().map(note_offset_of).collect(),
        })
    }

    /// X coordinate of the note's separator and the base of its waveform
    /// segment. Signed: a garbage start pointer below the unitary waveform
    /// base lands off-canvas to the left and draws nothing.
    pub fn note_offset(&self, note: usize) -> i64 {
        self.note_offsets[note]
    }
}

fn note_offset_of(record: &WaveformRecord) -> i64 {
    (record.start_pointer as i64 - STM32_START_UNITARY_WAVEFORM_ADDR) / 2
}

/// Maps a decoded sample onto the vertical band around WAVES_POSITION. The
/// center offset is added before the single truncation to int, so rounding
/// happens once, on the sum.
pub fn waveform_y(sample: i32) -> i32 {
    (WAVES_POSITION as f64
        + sample as f64 / (65535.0 / (IMAGE_HEIGHT as f64 * IMAGE_WAVEFORMS_SCALE))) as i32
}
