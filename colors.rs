use std::fmt;
use std::str::FromStr;

use image::Rgb;
use thiserror::Error;

use crate::percent::{round_ratio, Percent};

/// An sRGB color with 8-bit channels. Every `u8` is a valid channel, so a
/// `Color` can never hold an out-of-range value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

/// Hue in whole degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: Percent,
    pub lightness: Percent,
}

/// Which notation, if any, a piece of text is written in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Notation {
    Hex,
    Rgb,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("hex colors must be '#' followed by 3 or 6 hex digits")]
    Hex,
    #[error("rgb colors must look like rgb(r, g, b) with every channel in 0-255")]
    Rgb,
    #[error("expected a hex or rgb() color")]
    Unrecognized,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Standard RGB to HSL, worked out on the integer channels so that exact
    /// ties (93.75%, 122.5 degrees) always round up.
    pub fn to_hsl(&self) -> Hsl {
        let (r, g, b) = (self.red as u32, self.green as u32, self.blue as u32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let sum = max + min;

        // Lightness is (max + min) / 2 over channels scaled to 0-1
        let lightness = Percent::from_ratio(sum, 510);
        if delta == 0 {
            return Hsl { hue: 0, saturation: Percent::zero(), lightness };
        }

        // delta / (1 - |2L - 1|), both sides scaled by 255
        let saturation = Percent::from_ratio(delta, sum.min(510 - sum));

        // Degrees times delta, kept non-negative by adding a full turn
        let degrees = if max == r {
            60 * g + 360 * delta - 60 * b
        } else if max == g {
            60 * b + 120 * delta - 60 * r
        } else {
            60 * r + 240 * delta - 60 * g
        };

        Hsl {
            // 359.5 and up rounds to 360, the same hue as 0
            hue: (round_ratio(degrees, delta) % 360) as u16,
            saturation,
            lightness,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb([color.red, color.green, color.blue])
    }
}

impl From<Rgb<u8>> for Color {
    fn from(color: Rgb<u8>) -> Self {
        Color::new(color[0], color[1], color[2])
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.hue, self.saturation, self.lightness)
    }
}

pub fn classify(text: &str) -> Notation {
    if parse_hex(text).is_ok() {
        Notation::Hex
    } else if parse_rgb(text).is_ok() {
        Notation::Rgb
    } else {
        Notation::Invalid
    }
}

pub fn parse(text: &str) -> Result<Color, ColorParseError> {
    parse_hex(text)
        .or_else(|_| parse_rgb(text))
        .map_err(|_| ColorParseError::Unrecognized)
}

/// Parses `#rgb` or `#rrggbb`, in either case. The short form doubles each
/// digit, so `#a1f` is `#aa11ff`.
pub fn parse_hex(hex: &str) -> Result<Color, ColorParseError> {
    let digits = hex.strip_prefix('#').ok_or(ColorParseError::Hex)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorParseError::Hex);
    }

    // Only ASCII digits remain, so byte slicing stays on char boundaries
    match digits.len() {
        3 => {
            let r = hex_channel(&digits[0..1])?;
            let g = hex_channel(&digits[1..2])?;
            let b = hex_channel(&digits[2..3])?;

            Ok(Color::new(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = hex_channel(&digits[0..2])?;
            let g = hex_channel(&digits[2..4])?;
            let b = hex_channel(&digits[4..6])?;

            Ok(Color::new(r, g, b))
        }
        _ => Err(ColorParseError::Hex),
    }
}

/// Parses `rgb(r, g, b)`. The `rgb` token is case-insensitive and whitespace
/// may surround each channel. Channels are decimal integers checked against
/// 0-255 after parsing, so `rgb(299, 0, 0)` is rejected rather than clamped.
pub fn parse_rgb(rgb: &str) -> Result<Color, ColorParseError> {
    let head = rgb.get(..4).ok_or(ColorParseError::Rgb)?;
    if !head.eq_ignore_ascii_case("rgb(") {
        return Err(ColorParseError::Rgb);
    }
    let body = rgb[4..].strip_suffix(')').ok_or(ColorParseError::Rgb)?;

    let channels = body.split(',')
        .map(rgb_channel)
        .collect::<Result<Vec<u8>, _>>()?;

    match channels[..] {
        [r, g, b] => Ok(Color::new(r, g, b)),
        _ => Err(ColorParseError::Rgb),
    }
}

/// Euclidean distance between two colors in RGB space, unweighted.
pub fn distance(a: Color, b: Color) -> f64 {
    let dr = a.red as f64 - b.red as f64;
    let dg = a.green as f64 - b.green as f64;
    let db = a.blue as f64 - b.blue as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

fn hex_channel(digits: &str) -> Result<u8, ColorParseError> {
    u8::from_str_radix(digits, 16).map_err(|_| ColorParseError::Hex)
}

fn rgb_channel(field: &str) -> Result<u8, ColorParseError> {
    let numeral = field.trim_matches(|c: char| c.is_ascii_whitespace());
    if numeral.is_empty() || !numeral.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ColorParseError::Rgb);
    }

    // Overlong numerals overflow u32 and fail here too
    let value: u32 = numeral.parse().map_err(|_| ColorParseError::Rgb)?;
    u8::try_from(value).map_err(|_| ColorParseError::Rgb)
}
