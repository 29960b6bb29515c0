use std::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use embedded_graphics::Pixel;

use crate::canvas::Canvas;
use crate::dump::WaveDump;
use crate::font::{draw_string, FONT_8X8_THIN};
use crate::layout::{
    waveform_y, Layout, IMAGE_HEIGHT, LABEL_LINE_STEP, OCTAVE_BAND_STEP,
    START_UNITARY_WAVEFORM_OFFSET, TEXT_POSITION, WAVES_POSITION,
};
use crate::palette::{octave_of, OCTAVE_COLORS};

const BACKGROUND: Rgb888 = Rgb888::new(75, 60, 60);
const ZERO_LINE: Rgb888 = Rgb888::new(75, 90, 60);
const TRACE: Rgb888 = Rgb888::new(255, 255, 255);
const PEN_WIDTH: u32 = 2;
const MARKER_DIAMETER: u32 = 9; // radius 4 around the center pixel

/// Draws the whole scene onto a fresh canvas. Order matters: background,
/// zero line, trace, then per-note overlays, so the annotations stay on top.
pub fn compose(dump: &WaveDump, layout: &Layout) -> Canvas {
    let mut canvas = Canvas::new(layout.canvas_width, IMAGE_HEIGHT);
    if let Err(never) = draw_scene(&mut canvas, dump, layout) {
        match never {}
    }
    canvas
}

fn draw_scene(canvas: &mut Canvas, dump: &WaveDump, layout: &Layout) -> Result<(), Infallible> {
    canvas.clear(BACKGROUND)?;

    let right_edge = layout.canvas_width as i32 - 1;
    let bottom_edge = IMAGE_HEIGHT as i32 - 1;

    Line::new(
        Point::new(0, WAVES_POSITION),
        Point::new(right_edge, WAVES_POSITION),
    )
    .into_styled(PrimitiveStyle::with_stroke(ZERO_LINE, PEN_WIDTH))
    .draw(canvas)?;

    // one trace point per canvas column, read from the unitary waveform region
    for x in 0..layout.canvas_width as i64 {
        if let Some(sample) = dump.sample(x + START_UNITARY_WAVEFORM_OFFSET) {
            plot_pen_pixel(canvas, x as i32, waveform_y(sample), TRACE)?;
        }
    }

    for (note, record) in dump.records().iter().enumerate() {
        let octave = match octave_of(record.octave_coefficient) {
            Ok(octave) => octave,
            Err(err) => {
                warn!(note, %err, "skipping annotations for note");
                continue;
            }
        };
        let color = OCTAVE_COLORS[octave as usize];
        let offset = layout.note_offset(note);
        let x = offset as i32;
        let band_top = OCTAVE_BAND_STEP * octave as i32;

        // separators start lower for higher octaves, giving the staircase
        // that visually groups octave bands
        Line::new(Point::new(x, band_top), Point::new(x, bottom_edge))
            .into_styled(PrimitiveStyle::with_stroke(color, PEN_WIDTH))
            .draw(canvas)?;

        let labels = [
            format!("Oct {octave}"),
            format!("Frq {:.1}Hz", record.frequency),
            format!("Siz {}", record.area_size),
            format!("Idx {}", record.current_index),
            format!("Vol {}", record.current_volume),
        ];
        for (line, text) in labels.iter().enumerate() {
            draw_string(
                canvas,
                x + 2,
                TEXT_POSITION + band_top + LABEL_LINE_STEP * line as i32,
                text,
                color,
                &FONT_8X8_THIN,
            )?;
        }

        // playback position marker; skipped when the cursor points past the
        // sample region, where there is no amplitude to anchor it to
        let marker_x = offset + record.current_index as i64;
        if let Some(sample) = dump.sample(marker_x + START_UNITARY_WAVEFORM_OFFSET) {
            Circle::with_center(Point::new(marker_x as i32, waveform_y(sample)), MARKER_DIAMETER)
                .into_styled(PrimitiveStyle::with_stroke(color, PEN_WIDTH))
                .draw(canvas)?;
        }
    }

    Ok(())
}

// pen width 2: each trace point covers a 2x2 block
fn plot_pen_pixel(canvas: &mut Canvas, x: i32, y: i32, color: Rgb888) -> Result<(), Infallible> {
    canvas.draw_iter(
        (0..PEN_WIDTH as i32).flat_map(|dy| {
            (0..PEN_WIDTH as i32).map(move |dx| Pixel(Point::new(x + dx, y + dy), color))
        }),
    )
}
