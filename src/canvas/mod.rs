//! Freehand drawing surface.
//!
//! Captures pointer gestures as vector strokes over a fixed-size raster,
//! keeps a linear undo/redo history, and imports/exports the flattened
//! composite as a PNG data URI. Stroke vectors are never persisted; saving
//! an edited drawing layers new strokes over the previously flattened image.

mod raster;
mod stroke;

pub use raster::{from_data_uri, to_data_uri, DATA_URI_PREFIX};
pub use stroke::{BrushColor, BrushWidth, Point, Stroke};

use anyhow::Result;
use image::RgbaImage;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 400;

/// Outcome of loading an initial drawing onto the surface.
///
/// A payload that fails to decode leaves the surface untouched; the caller
/// degrades to an empty canvas instead of failing the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadResult {
    Loaded,
    Invalid,
}

pub struct DrawingSurface {
    width: u32,
    height: u32,
    /// Flattened layer beneath the stroke history (loaded image, if any).
    base: RgbaImage,
    /// Live composite: base + committed strokes + the active stroke.
    raster: RgbaImage,
    history: Vec<Stroke>,
    /// History position: `history[..cursor]` is rendered.
    cursor: usize,
    active: Option<Stroke>,
    brush_color: BrushColor,
    brush_width: BrushWidth,
    has_content: bool,
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            base: raster::blank(width, height),
            raster: raster::blank(width, height),
            history: Vec::new(),
            cursor: 0,
            active: None,
            brush_color: BrushColor::default(),
            brush_width: BrushWidth::default(),
            has_content: false,
        }
    }

    /// Surface sized to a decoded image, with the image as its base layer.
    /// Unlike `load_png`, an undecodable payload here is a hard error: the
    /// caller supplied the bytes directly and can be told so.
    pub fn from_image_bytes(bytes: &[u8]) -> Result<Self> {
        let img = raster::decode_image(bytes)?;
        let mut surface = Self::new(img.width(), img.height());
        surface.base = img;
        surface.raster = surface.base.clone();
        surface.has_content = true;
        Ok(surface)
    }

    // ==================== LOADING ====================

    /// Decode a stored drawing (data URI) onto the base layer.
    pub fn load_data_uri(&mut self, uri: &str) -> LoadResult {
        match raster::from_data_uri(uri) {
            Ok(bytes) => self.load_png(&bytes),
            Err(_) => LoadResult::Invalid,
        }
    }

    /// Decode image bytes onto the base layer, alpha-composited at the
    /// origin and clipped to the surface. On success the surface counts as
    /// having content even before any new stroke.
    pub fn load_png(&mut self, bytes: &[u8]) -> LoadResult {
        let img = match raster::decode_image(bytes) {
            Ok(img) => img,
            Err(_) => return LoadResult::Invalid,
        };

        image::imageops::overlay(&mut self.base, &img, 0, 0);
        self.has_content = true;
        self.replay();
        LoadResult::Loaded
    }

    // ==================== STROKE CAPTURE ====================

    /// Pointer-down: start capturing with the current brush. No-op while a
    /// stroke is already active.
    pub fn begin_stroke(&mut self, point: Point) {
        if self.active.is_some() {
            return;
        }
        let p = self.clamp(point);
        let stroke = Stroke::new(self.brush_color, self.brush_width, p);
        raster::draw_stroke(&mut self.raster, &stroke);
        self.active = Some(stroke);
    }

    /// Pointer-move: append a sample and render the new segment. Ignored
    /// when no stroke is active.
    pub fn append_point(&mut self, point: Point) {
        let p = self.clamp(point);
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let last = *active.points.last().unwrap_or(&p);
        active.points.push(p);
        raster::draw_segment(
            &mut self.raster,
            last,
            p,
            active.width.px() as f32 / 2.0,
            image::Rgba(active.color.rgba()),
        );
    }

    /// Pointer-up: commit the active stroke at the history position,
    /// discarding any redo tail. No-op when no stroke is active.
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.active.take() else {
            return;
        };
        self.history.truncate(self.cursor);
        self.history.push(stroke);
        self.cursor = self.history.len();
        self.has_content = true;
    }

    // ==================== HISTORY ====================

    /// Step the history position back and replay. No-op at the start.
    pub fn undo(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.replay();
    }

    /// Step the history position forward and replay. No-op at the end.
    pub fn redo(&mut self) {
        if self.cursor == self.history.len() {
            return;
        }
        self.cursor += 1;
        self.replay();
    }

    /// Drop everything: history, active stroke, base layer, content flag.
    pub fn clear(&mut self) {
        self.history.clear();
        self.cursor = 0;
        self.active = None;
        self.base = raster::blank(self.width, self.height);
        self.raster = raster::blank(self.width, self.height);
        self.has_content = false;
    }

    // ==================== EXPORT ====================

    /// Flatten base + committed strokes through the history position into
    /// PNG bytes. The active stroke is excluded, so the output is a pure
    /// function of the base layer and the history position.
    pub fn export_image(&self) -> Result<Vec<u8>> {
        raster::encode_png(&self.compose())
    }

    pub fn export_data_uri(&self) -> Result<String> {
        Ok(raster::to_data_uri(&self.export_image()?))
    }

    // ==================== BRUSH ====================

    /// Affects only strokes begun after the call.
    pub fn set_brush_color(&mut self, color: BrushColor) {
        self.brush_color = color;
    }

    /// Affects only strokes begun after the call.
    pub fn set_brush_size(&mut self, width: BrushWidth) {
        self.brush_width = width;
    }

    // ==================== ACCESSORS ====================

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    // ==================== INTERNAL ====================

    fn replay(&mut self) {
        self.raster = self.compose();
    }

    fn compose(&self) -> RgbaImage {
        let mut img = self.base.clone();
        for stroke in &self.history[..self.cursor] {
            raster::draw_stroke(&mut img, stroke);
        }
        img
    }

    fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0.0, self.width as f32),
            p.y.clamp(0.0, self.height as f32),
        )
    }
}
