use std::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::Pixel;

/// Fixed-cell bitmap font. Glyphs are stored column-major, one byte per
/// column, bit N of a column = row N (top row in the low bit).
pub struct FontDef {
    pub width: u8,
    /// Highest row index holding glyph data; rows 0..=height are rendered.
    pub height: u8,
    pub first_char: u8,
    pub last_char: u8,
    pub table: &'static [u8],
}

/// 8x8 thin font covering space through 'Z'. Lower-case input is folded to
/// upper case by the renderer, so the table stops at 0x5A.
pub const FONT_8X8_THIN: FontDef = FontDef {
    width: 8,
    height: 7,
    first_char: 0x20,
    last_char: 0x5A,
    table: &FONT_8X8_THIN_TABLE,
};

#[rustfmt::skip]
const FONT_8X8_THIN_TABLE: [u8; 59 * 8] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // ' '
    0x00, 0x00, 0x2F, 0x00, 0x00, 0x00, 0x00, 0x00, // '!'
    0x00, 0x07, 0x00, 0x07, 0x00, 0x00, 0x00, 0x00, // '"'
    0x12, 0x3F, 0x12, 0x3F, 0x12, 0x00, 0x00, 0x00, // '#'
    0x24, 0x2A, 0x7F, 0x2A, 0x12, 0x00, 0x00, 0x00, // '$'
    0x23, 0x13, 0x08, 0x04, 0x32, 0x31, 0x00, 0x00, // '%'
    0x1A, 0x25, 0x2D, 0x12, 0x28, 0x00, 0x00, 0x00, // '&'
    0x00, 0x00, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, // '''
    0x00, 0x0C, 0x12, 0x21, 0x00, 0x00, 0x00, 0x00, // '('
    0x00, 0x21, 0x12, 0x0C, 0x00, 0x00, 0x00, 0x00, // ')'
    0x2A, 0x1C, 0x3E, 0x1C, 0x2A, 0x00, 0x00, 0x00, // '*'
    0x08, 0x08, 0x3E, 0x08, 0x08, 0x00, 0x00, 0x00, // '+'
    0x00, 0x40, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00, // ','
    0x08, 0x08, 0x08, 0x08, 0x08, 0x00, 0x00, 0x00, // '-'
    0x00, 0x30, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00, // '.'
    0x20, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00, 0x00, // '/'
    0x1E, 0x31, 0x29, 0x25, 0x1E, 0x00, 0x00, 0x00, // '0'
    0x00, 0x22, 0x3F, 0x20, 0x00, 0x00, 0x00, 0x00, // '1'
    0x22, 0x31, 0x29, 0x25, 0x22, 0x00, 0x00, 0x00, // '2'
    0x12, 0x21, 0x25, 0x25, 0x1A, 0x00, 0x00, 0x00, // '3'
    0x08, 0x0C, 0x0A, 0x3F, 0x08, 0x00, 0x00, 0x00, // '4'
    0x17, 0x25, 0x25, 0x25, 0x19, 0x00, 0x00, 0x00, // '5'
    0x1E, 0x25, 0x25, 0x25, 0x18, 0x00, 0x00, 0x00, // '6'
    0x01, 0x31, 0x09, 0x05, 0x03, 0x00, 0x00, 0x00, // '7'
    0x1A, 0x25, 0x25, 0x25, 0x1A, 0x00, 0x00, 0x00, // '8'
    0x06, 0x29, 0x29, 0x29, 0x1E, 0x00, 0x00, 0x00, // '9'
    0x00, 0x36, 0x36, 0x00, 0x00, 0x00, 0x00, 0x00, // ':'
    0x00, 0x56, 0x36, 0x00, 0x00, 0x00, 0x00, 0x00, // ';'
    0x00, 0x0C, 0x12, 0x21, 0x00, 0x00, 0x00, 0x00, // '<'
    0x14, 0x14, 0x14, 0x14, 0x00, 0x00, 0x00, 0x00, // '='
    0x00, 0x21, 0x12, 0x0C, 0x00, 0x00, 0x00, 0x00, // '>'
    0x02, 0x01, 0x29, 0x05, 0x02, 0x00, 0x00, 0x00, // '?'
    0x1E, 0x21, 0x3D, 0x35, 0x0E, 0x00, 0x00, 0x00, // '@'
    0x3E, 0x09, 0x09, 0x09, 0x3E, 0x00, 0x00, 0x00, // 'A'
    0x3F, 0x25, 0x25, 0x25, 0x1A, 0x00, 0x00, 0x00, // 'B'
    0x1E, 0x21, 0x21, 0x21, 0x12, 0x00, 0x00, 0x00, // 'C'
    0x3F, 0x21, 0x21, 0x21, 0x1E, 0x00, 0x00, 0x00, // 'D'
    0x3F, 0x25, 0x25, 0x25, 0x21, 0x00, 0x00, 0x00, // 'E'
    0x3F, 0x05, 0x05, 0x05, 0x01, 0x00, 0x00, 0x00, // 'F'
    0x1E, 0x21, 0x29, 0x29, 0x1A, 0x00, 0x00, 0x00, // 'G'
    0x3F, 0x04, 0x04, 0x04, 0x3F, 0x00, 0x00, 0x00, // 'H'
    0x00, 0x21, 0x3F, 0x21, 0x00, 0x00, 0x00, 0x00, // 'I'
    0x10, 0x20, 0x20, 0x20, 0x1F, 0x00, 0x00, 0x00, // 'J'
    0x3F, 0x04, 0x04, 0x0A, 0x31, 0x00, 0x00, 0x00, // 'K'
    0x3F, 0x20, 0x20, 0x20, 0x20, 0x00, 0x00, 0x00, // 'L'
    0x3F, 0x02, 0x04, 0x02, 0x3F, 0x00, 0x00, 0x00, // 'M'
    0x3F, 0x02, 0x04, 0x08, 0x3F, 0x00, 0x00, 0x00, // 'N'
    0x1E, 0x21, 0x21, 0x21, 0x1E, 0x00, 0x00, 0x00, // 'O'
    0x3F, 0x09, 0x09, 0x09, 0x06, 0x00, 0x00, 0x00, // 'P'
    0x1E, 0x21, 0x29, 0x11, 0x2E, 0x00, 0x00, 0x00, // 'Q'
    0x3F, 0x09, 0x09, 0x19, 0x26, 0x00, 0x00, 0x00, // 'R'
    0x22, 0x25, 0x25, 0x25, 0x19, 0x00, 0x00, 0x00, // 'S'
    0x01, 0x01, 0x3F, 0x01, 0x01, 0x00, 0x00, 0x00, // 'T'
    0x1F, 0x20, 0x20, 0x20, 0x1F, 0x00, 0x00, 0x00, // 'U'
    0x0F, 0x10, 0x20, 0x10, 0x0F, 0x00, 0x00, 0x00, // 'V'
    0x3F, 0x10, 0x08, 0x10, 0x3F, 0x00, 0x00, 0x00, // 'W'
    0x21, 0x12, 0x0C, 0x12, 0x21, 0x00, 0x00, 0x00, // 'X'
    0x03, 0x04, 0x38, 0x04, 0x03, 0x00, 0x00, 0x00, // 'Y'
    0x31, 0x29, 0x25, 0x23, 0x21, 0x00, 0x00, 0x00, // 'Z'
];

/// Renders one glyph cell. Characters past the end of the table are folded
/// to upper case and retried; anything still without a glyph renders as a
/// solid block so a bad string is visible instead of silently blank.
pub fn draw_char<D>(target: &mut D, x: i32, y: i32, c: u8, color: Rgb888, font: &FontDef) -> Result<(), Infallible>
where
    D: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    const SOLID_BLOCK: [u8; 8] = [0xFF; 8];

    let mut c = c;
    if c > font.last_char && font.last_char < 128 {
        c -= 32;
    }

    let width = font.width as usize;
    let columns: &[u8] = if c >= font.first_char && c <= font.last_char {
        let start = (c - font.first_char) as usize * width;
        &font.table[start..start + width]
    } else {
        &SOLID_BLOCK[..width]
    };

    for (xoffset, &column) in columns.iter().enumerate() {
        for yoffset in 0..=font.height as u32 {
            // shift the row bit up to the top of the byte, then back to bit 0
            let bit = (column << (8 - (yoffset + 1))) >> 7;
            if bit != 0 {
                Pixel(Point::new(x + xoffset as i32, y + yoffset as i32), color).draw(target)?;
            }
        }
    }
    Ok(())
}

/// Single-line string render with a fixed advance of width + 1 pixels per
/// character. Codes below the first printable character or at/above DEL are
/// skipped: their cell stays empty but following characters keep their slot.
pub fn draw_string<D>(target: &mut D, x: i32, y: i32, text: &str, color: Rgb888, font: &FontDef) -> Result<(), Infallible>
where
    D: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    let advance = font.width as i32 + 1;
    for (slot, c) in text.bytes().enumerate() {
        if c < font.first_char || c >= 0x7F {
            continue;
        }
        draw_char(target, x + slot as i32 * advance, y, c, color, font)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use image::Rgb;
    use pretty_assertions::assert_eq;

    const INK: Rgb888 = Rgb888::new(255, 255, 255);

    fn cell_pixel_count(canvas: &Canvas, cell: u32) -> usize {
        let advance = FONT_8X8_THIN.width as u32 + 1;
        let mut count = 0;
        for x in cell * advance..cell * advance + FONT_8X8_THIN.width as u32 {
            for y in 0..canvas.height() {
                if canvas.pixel(x, y) == Rgb([255, 255, 255]) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn unprintable_character_leaves_its_cell_empty_but_keeps_the_slot() {
        let mut canvas = Canvas::new(40, 10);
        draw_string(&mut canvas, 0, 0, "A\x01A", INK, &FONT_8X8_THIN).unwrap();
        let first = cell_pixel_count(&canvas, 0);
        assert!(first > 0);
        assert_eq!(cell_pixel_count(&canvas, 1), 0);
        // third character advanced past the empty cell
        assert_eq!(cell_pixel_count(&canvas, 2), first);
    }

    #[test]
    fn lower_case_is_folded_to_upper_case() {
        let mut canvas_lower = Canvas::new(10, 10);
        let mut canvas_upper = Canvas::new(10, 10);
        draw_char(&mut canvas_lower, 0, 0, b'z', INK, &FONT_8X8_THIN).unwrap();
        draw_char(&mut canvas_upper, 0, 0, b'Z', INK, &FONT_8X8_THIN).unwrap();
        for x in 0..10 {
            for y in 0..10 {
                assert_eq!(canvas_lower.pixel(x, y), canvas_upper.pixel(x, y));
            }
        }
    }

    #[test]
    fn characters_without_a_glyph_render_as_a_solid_block() {
        // '{' folds to 0x5B, past the last glyph, so the placeholder fires
        let mut canvas = Canvas::new(10, 10);
        draw_char(&mut canvas, 0, 0, b'{', INK, &FONT_8X8_THIN).unwrap();
        for x in 0..FONT_8X8_THIN.width as u32 {
            for y in 0..=FONT_8X8_THIN.height as u32 {
                assert_eq!(canvas.pixel(x, y), Rgb([255, 255, 255]));
            }
        }
    }

    #[test]
    fn del_is_skipped_at_string_level() {
        let mut canvas = Canvas::new(20, 10);
        draw_string(&mut canvas, 0, 0, "\x7F", INK, &FONT_8X8_THIN).unwrap();
        assert_eq!(cell_pixel_count(&canvas, 0), 0);
    }
}
