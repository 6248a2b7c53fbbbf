//! Drawing surface abstraction shared by the tree and the petals.
//!
//! All coordinates are world units (see `config::WORLD_WIDTH`), y grows
//! downwards.

/// A point in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 8-bit colour with alpha
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Filled ellipse description
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f32,
    pub radius_y: f32,
    /// Rotation in degrees, clockwise on screen
    pub rotation: f32,
    pub fill: Rgba,
}

impl Ellipse {
    /// Unrotated circle
    pub fn disc(center: Point, radius: f32, fill: Rgba) -> Self {
        Self {
            center,
            radius_x: radius,
            radius_y: radius,
            rotation: 0.0,
            fill,
        }
    }
}

/// Something the tree and petals can draw onto
pub trait Canvas {
    /// Line segment with a uniform colour
    fn line(&mut self, from: Point, to: Point, thickness: f32, color: Rgba);

    /// Filled, possibly rotated ellipse
    fn ellipse(&mut self, shape: Ellipse);
}

/// Swallows every draw call. Used for collection passes.
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn line(&mut self, _from: Point, _to: Point, _thickness: f32, _color: Rgba) {}

    fn ellipse(&mut self, _shape: Ellipse) {}
}
