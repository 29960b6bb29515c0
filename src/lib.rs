#[macro_use]
extern crate tracing;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod canvas;
pub mod cli;
pub mod dump;
pub mod font;
pub mod layout;
pub mod palette;
pub mod render;

use canvas::Canvas;
use dump::WaveDump;
use layout::Layout;

#[derive(Debug, Error)]
pub enum PrinterError {
    #[error("cannot read {path}: {source}")]
    InputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] dump::DecodeError),
    #[error(transparent)]
    Layout(#[from] layout::LayoutError),
    #[error("cannot write {path}: {source}")]
    OutputFailed {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Decodes a raw dump buffer and renders it to a finished canvas.
pub fn render_dump(buffer: Vec<u8>) -> Result<Canvas, PrinterError> {
    let dump = WaveDump::decode(buffer)?;
    let layout = Layout::from_records(dump.records())?;
    info!(
        notes = dump.records().len(),
        canvas_width = layout.canvas_width,
        "decoded waveform dump"
    );
    Ok(render::compose(&dump, &layout))
}

/// Whole pipeline: read the dump file, render, write the bitmap. One pass,
/// no retries.
pub fn run(input: &Path, output: &Path) -> Result<(), PrinterError> {
    let buffer = fs::read(input).map_err(|source| PrinterError::InputUnavailable {
        path: input.to_path_buf(),
        source,
    })?;
    let canvas = render_dump(buffer)?;
    canvas.save(output).map_err(|source| PrinterError::OutputFailed {
        path: output.to_path_buf(),
        source,
    })?;
    info!(output = %output.display(), "wrote waveform image");
    Ok(())
}
