use image::Rgb;
use pretty_assertions::assert_eq;

use waveform_printer::dump::RECORD_STRIDE;
use waveform_printer::layout::{
    NUMBER_OF_NOTES, STM32_START_UNITARY_WAVEFORM_ADDR, WAVES_POSITION,
};
use waveform_printer::{render_dump, PrinterError};

const BACKGROUND: Rgb<u8> = Rgb([75, 60, 60]);
const ZERO_LINE: Rgb<u8> = Rgb([75, 90, 60]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const OCTAVE_0: Rgb<u8> = Rgb([10, 255, 255]);

struct RawRecord {
    start_pointer: i32,
    current_index: u16,
    area_size: u16,
    octave_coefficient: u16,
    current_volume: i32,
    frequency: f32,
}

impl RawRecord {
    fn write_into(&self, raw: &mut [u8]) {
        raw[0..4].copy_from_slice(&self.start_pointer.to_le_bytes());
        raw[4..6].copy_from_slice(&self.current_index.to_le_bytes());
        raw[6..8].copy_from_slice(&self.area_size.to_le_bytes());
        raw[8..10].copy_from_slice(&self.octave_coefficient.to_le_bytes());
        raw[12..16].copy_from_slice(&self.current_volume.to_le_bytes());
        raw[20..24].copy_from_slice(&self.frequency.to_le_bytes());
    }
}

/// Dump with note 0 as the only annotated note, a far-out last note fixing
/// the canvas width at 112 columns, and ten zero samples of waveform.
fn synthetic_dump() -> Vec<u8> {
    let base = STM32_START_UNITARY_WAVEFORM_ADDR as i32;
    let mut buffer = vec![0u8; NUMBER_OF_NOTES * RECORD_STRIDE];
    RawRecord {
        start_pointer: base,
        current_index: 5,
        area_size: 10,
        octave_coefficient: 1,
        current_volume: 100,
        frequency: 440.0,
    }
    .write_into(&mut buffer[..RECORD_STRIDE]);
    // the width formula only looks at the last record; its zeroed octave
    // coefficient keeps its own annotations off the canvas
    RawRecord {
        start_pointer: base + 200,
        current_index: 0,
        area_size: 10,
        octave_coefficient: 0,
        current_volume: 0,
        frequency: 0.0,
    }
    .write_into(&mut buffer[(NUMBER_OF_NOTES - 1) * RECORD_STRIDE..]);
    buffer.extend_from_slice(&[0u8; 20]);
    buffer
}

#[test]
fn renders_the_expected_scene() {
    let canvas = render_dump(synthetic_dump()).unwrap();
    assert_eq!(canvas.width(), 112);
    assert_eq!(canvas.height(), 1000);

    let center = WAVES_POSITION as u32;

    // zero line shows where the sample region has run out
    assert_eq!(canvas.pixel(50, center), ZERO_LINE);
    // zero samples put the white trace exactly on the center line
    assert_eq!(canvas.pixel(3, center), WHITE);
    // note 0 separator runs the full height at x = 0
    assert_eq!(canvas.pixel(0, 800), OCTAVE_0);
    assert_eq!(canvas.pixel(0, 999), OCTAVE_0);
    // "Oct 0" label: first column of the 'O' glyph at (2, 10)
    assert_eq!(canvas.pixel(2, 11), OCTAVE_0);
    // playback marker ring, radius 4 around (current_index, center)
    assert_eq!(canvas.pixel(5, center + 4), OCTAVE_0);
    assert_eq!(canvas.pixel(5, center - 4), OCTAVE_0);
    // untouched area keeps the background
    assert_eq!(canvas.pixel(50, 100), BACKGROUND);
    assert_eq!(canvas.pixel(80, 300), BACKGROUND);
}

#[test]
fn all_zero_records_are_a_layout_error_not_a_giant_canvas() {
    let buffer = vec![0u8; NUMBER_OF_NOTES * RECORD_STRIDE];
    match render_dump(buffer) {
        Err(PrinterError::Layout(_)) => {}
        other => panic!("expected layout error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn truncated_dump_is_a_decode_error() {
    match render_dump(vec![0u8; 100]) {
        Err(PrinterError::Decode(_)) => {}
        other => panic!("expected decode error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn run_writes_a_bitmap_next_to_the_dump() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw_waveforms");
    let output = dir.path().join("waveform.bmp");
    std::fs::write(&input, synthetic_dump()).unwrap();

    waveform_printer::run(&input, &output).unwrap();

    let image = image::open(&output).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (112, 1000));
    assert_eq!(*image.get_pixel(50, 100), BACKGROUND);
}

#[test]
fn missing_input_reports_input_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    match waveform_printer::run(&dir.path().join("nope"), &dir.path().join("out.bmp")) {
        Err(PrinterError::InputUnavailable { .. }) => {}
        other => panic!("expected input error, got {:?}", other.map(|_| ())),
    }
}
