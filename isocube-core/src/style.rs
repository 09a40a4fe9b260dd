/// Presentation palette keyed by topology tags
///
/// Geometry never refers to colors. Renderers look up an [`EdgeBand`],
/// [`FaceKey`] or [`Accent`] here to decide how to paint it.
use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map_res},
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Accent, EdgeBand, FaceKey};

/// 8-bit sRGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`
    pub fn from_hex(input: &str) -> Result<Self> {
        match parse_hex_color(input.trim()) {
            Ok((_, rgb)) => Ok(rgb),
            Err(_) => Err(Error::InvalidColor(input.to_string())),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blend toward black by `opacity` in [0, 1]
    pub fn dimmed(&self, opacity: f64) -> Self {
        let k = opacity.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * k).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), |s: &str| u8::from_str_radix(s, 16))(input)
}

fn hex_single(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, is_hex_digit), |s: &str| {
        u8::from_str_radix(s, 16).map(|v| v * 17)
    })(input)
}

fn parse_hex_color(input: &str) -> IResult<&str, Rgb> {
    let long = all_consuming(tuple((hex_pair, hex_pair, hex_pair)));
    let short = all_consuming(tuple((hex_single, hex_single, hex_single)));
    let (rest, (r, g, b)) = preceded(tag("#"), alt((long, short)))(input)?;
    Ok((rest, Rgb::new(r, g, b)))
}

/// Direction a linear gradient runs across its element's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientAxis {
    /// Top-left to bottom-right
    Diagonal,
    /// Top to bottom
    Vertical,
    /// Left to right
    Horizontal,
}

impl GradientAxis {
    /// End points as percentages: (x1, y1, x2, y2)
    pub fn endpoints(&self) -> (u8, u8, u8, u8) {
        match self {
            GradientAxis::Diagonal => (0, 0, 100, 100),
            GradientAxis::Vertical => (0, 0, 0, 100),
            GradientAxis::Horizontal => (0, 0, 100, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the axis, in percent
    pub offset: f64,
    pub color: Rgb,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub id: String,
    pub axis: GradientAxis,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn new(id: &str, axis: GradientAxis, stops: &[(f64, Rgb, f64)]) -> Self {
        Self {
            id: id.to_string(),
            axis,
            stops: stops
                .iter()
                .map(|&(offset, color, opacity)| GradientStop {
                    offset,
                    color,
                    opacity,
                })
                .collect(),
        }
    }

    /// Color of the first stop, for surfaces that cannot draw gradients
    pub fn primary(&self) -> Rgb {
        self.stops.first().map(|s| s.color).unwrap_or(WHITE)
    }
}

const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

const EMERALD_500: Rgb = Rgb::new(0x10, 0xb9, 0x81);
const EMERALD_400: Rgb = Rgb::new(0x34, 0xd3, 0x99);
const VIOLET_500: Rgb = Rgb::new(0x8b, 0x5c, 0xf6);
const VIOLET_400: Rgb = Rgb::new(0xa7, 0x8b, 0xfa);
const CYAN_500: Rgb = Rgb::new(0x06, 0xb6, 0xd4);
const CYAN_400: Rgb = Rgb::new(0x22, 0xd3, 0xee);
const PURPLE_500: Rgb = Rgb::new(0xa8, 0x55, 0xf7);

/// Every color and gradient the illustration uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub near_ring: Gradient,
    pub far_ring: Gradient,
    pub connecting: Gradient,
    pub inner: Gradient,
    pub face_z: Gradient,
    pub face_x: Gradient,
    pub face_y: Gradient,
    /// Fill of the blurred backdrop glow
    pub glow: Gradient,
    pub emerald: Rgb,
    pub violet: Rgb,
    pub cyan: Rgb,
    /// Tint of the rotating halo and the drop shadow behind the cube
    pub backdrop: Rgb,
    /// Stroke of the corner brackets
    pub bracket: Rgb,
}

impl Palette {
    pub fn edge_gradient(&self, band: EdgeBand) -> &Gradient {
        match band {
            EdgeBand::NearRing => &self.near_ring,
            EdgeBand::FarRing => &self.far_ring,
            EdgeBand::Connecting => &self.connecting,
        }
    }

    pub fn inner_gradient(&self) -> &Gradient {
        &self.inner
    }

    pub fn face_gradient(&self, key: FaceKey) -> &Gradient {
        match key {
            FaceKey::PositiveZ => &self.face_z,
            FaceKey::PositiveX => &self.face_x,
            FaceKey::PositiveY => &self.face_y,
        }
    }

    pub fn accent(&self, accent: Accent) -> Rgb {
        match accent {
            Accent::Emerald => self.emerald,
            Accent::Violet => self.violet,
            Accent::Cyan => self.cyan,
        }
    }

    /// All gradients, for emitting shared definitions once
    pub fn gradients(&self) -> [&Gradient; 8] {
        [
            &self.near_ring,
            &self.far_ring,
            &self.connecting,
            &self.inner,
            &self.face_z,
            &self.face_x,
            &self.face_y,
            &self.glow,
        ]
    }
}

impl Default for Palette {
    fn default() -> Self {
        use GradientAxis::{Diagonal, Horizontal, Vertical};
        Self {
            near_ring: Gradient::new(
                "edgeGradient1",
                Diagonal,
                &[(0.0, VIOLET_500, 0.9), (100.0, VIOLET_400, 0.7)],
            ),
            far_ring: Gradient::new(
                "edgeGradient2",
                Diagonal,
                &[(0.0, EMERALD_500, 1.0), (100.0, EMERALD_400, 0.8)],
            ),
            connecting: Gradient::new(
                "edgeGradient",
                Diagonal,
                &[(0.0, VIOLET_500, 0.8), (50.0, EMERALD_500, 0.9), (100.0, CYAN_500, 0.8)],
            ),
            inner: Gradient::new(
                "innerGradient",
                Diagonal,
                &[(0.0, EMERALD_500, 0.8), (50.0, VIOLET_500, 0.9), (100.0, CYAN_500, 0.8)],
            ),
            face_z: Gradient::new(
                "faceGradient1",
                Diagonal,
                &[(0.0, EMERALD_500, 0.1), (100.0, EMERALD_400, 0.15)],
            ),
            face_x: Gradient::new(
                "faceGradient2",
                Diagonal,
                &[(0.0, VIOLET_500, 0.1), (100.0, VIOLET_400, 0.15)],
            ),
            face_y: Gradient::new(
                "faceGradient3",
                Vertical,
                &[(0.0, CYAN_500, 0.1), (100.0, CYAN_400, 0.15)],
            ),
            glow: Gradient::new(
                "glowGradient",
                Horizontal,
                &[(0.0, PURPLE_500, 0.2), (50.0, EMERALD_500, 0.2), (100.0, CYAN_500, 0.2)],
            ),
            emerald: EMERALD_500,
            violet: VIOLET_500,
            cyan: CYAN_500,
            backdrop: VIOLET_500,
            bracket: CYAN_400,
        }
    }
}
