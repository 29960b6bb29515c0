use embedded_graphics::pixelcolor::Rgb888;
use thiserror::Error;

/// One fixed color per octave band, indexed 0..=15. Total over every octave
/// a valid coefficient can produce, so a checked `octave_of` result indexes
/// without a fallback branch.
pub const OCTAVE_COLORS: [Rgb888; 16] = [
    Rgb888::new(10, 255, 255),
    Rgb888::new(250, 110, 200),
    Rgb888::new(100, 150, 110),
    Rgb888::new(255, 110, 60),
    Rgb888::new(255, 55, 125),
    Rgb888::new(255, 125, 100),
    Rgb888::new(155, 200, 100),
    Rgb888::new(200, 155, 70),
    Rgb888::new(0, 255, 55),
    Rgb888::new(255, 0, 100),
    Rgb888::new(255, 240, 0),
    Rgb888::new(90, 150, 200),
    Rgb888::new(200, 100, 50),
    Rgb888::new(125, 0, 200),
    Rgb888::new(200, 0, 0),
    Rgb888::new(95, 0, 250),
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("octave coefficient {0} is not a power of two")]
pub struct InvalidOctave(pub u16);

/// octave = log2(coefficient), defined only for powers of two. Every u16
/// power of two gives an octave in 0..=15.
pub fn octave_of(coefficient: u16) -> Result<u8, InvalidOctave> {
    if coefficient.is_power_of_two() {
        Ok(coefficient.trailing_zeros() as u8)
    } else {
        Err(InvalidOctave(coefficient))
    }
}
