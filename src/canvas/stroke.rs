use serde::{Deserialize, Serialize};

/// A single pointer sample on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Brush color. A closed palette, not free-form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrushColor {
    #[default]
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Pink,
    Cyan,
    White,
}

impl BrushColor {
    pub fn rgba(self) -> [u8; 4] {
        match self {
            BrushColor::Black => [0x00, 0x00, 0x00, 0xFF],
            BrushColor::Red => [0xFF, 0x00, 0x00, 0xFF],
            BrushColor::Green => [0x00, 0xFF, 0x00, 0xFF],
            BrushColor::Blue => [0x00, 0x00, 0xFF, 0xFF],
            BrushColor::Yellow => [0xFF, 0xFF, 0x00, 0xFF],
            BrushColor::Pink => [0xFF, 0x00, 0xFF, 0xFF],
            BrushColor::Cyan => [0x00, 0xFF, 0xFF, 0xFF],
            BrushColor::White => [0xFF, 0xFF, 0xFF, 0xFF],
        }
    }
}

impl std::fmt::Display for BrushColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrushColor::Black => write!(f, "black"),
            BrushColor::Red => write!(f, "red"),
            BrushColor::Green => write!(f, "green"),
            BrushColor::Blue => write!(f, "blue"),
            BrushColor::Yellow => write!(f, "yellow"),
            BrushColor::Pink => write!(f, "pink"),
            BrushColor::Cyan => write!(f, "cyan"),
            BrushColor::White => write!(f, "white"),
        }
    }
}

impl std::str::FromStr for BrushColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "black" => Ok(BrushColor::Black),
            "red" => Ok(BrushColor::Red),
            "green" => Ok(BrushColor::Green),
            "blue" => Ok(BrushColor::Blue),
            "yellow" => Ok(BrushColor::Yellow),
            "pink" => Ok(BrushColor::Pink),
            "cyan" => Ok(BrushColor::Cyan),
            "white" => Ok(BrushColor::White),
            _ => Err(format!("unknown brush color: {}", s)),
        }
    }
}

/// Brush width. Five fixed sizes, in pixels of stroke diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrushWidth {
    #[default]
    Fine,
    Thin,
    Medium,
    Thick,
    Heavy,
}

impl BrushWidth {
    pub fn px(self) -> u32 {
        match self {
            BrushWidth::Fine => 2,
            BrushWidth::Thin => 4,
            BrushWidth::Medium => 6,
            BrushWidth::Thick => 8,
            BrushWidth::Heavy => 10,
        }
    }
}

impl std::fmt::Display for BrushWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrushWidth::Fine => write!(f, "fine"),
            BrushWidth::Thin => write!(f, "thin"),
            BrushWidth::Medium => write!(f, "medium"),
            BrushWidth::Thick => write!(f, "thick"),
            BrushWidth::Heavy => write!(f, "heavy"),
        }
    }
}

impl std::str::FromStr for BrushWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fine" => Ok(BrushWidth::Fine),
            "thin" => Ok(BrushWidth::Thin),
            "medium" => Ok(BrushWidth::Medium),
            "thick" => Ok(BrushWidth::Thick),
            "heavy" => Ok(BrushWidth::Heavy),
            _ => Err(format!("unknown brush width: {}", s)),
        }
    }
}

/// One continuous pointer-down-to-pointer-up gesture: ordered samples plus
/// the brush style captured when the stroke began. Strokes live only in the
/// surface's in-memory history; persistence sees the flattened raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: BrushColor,
    pub width: BrushWidth,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(color: BrushColor, width: BrushWidth, start: Point) -> Self {
        Self {
            color,
            width,
            points: vec![start],
        }
    }
}
