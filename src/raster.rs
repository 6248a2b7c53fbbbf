//! Braille dot canvas
//!
//! Every terminal cell holds a 2x4 grid of dots. The world is scaled
//! uniformly onto the dot grid, centred horizontally and standing on the
//! bottom edge. Each cell keeps one ink colour, alpha blended over the sky.

use crate::canvas::{Canvas, Ellipse, Point, Rgba};
use crate::terminal::{rgb, Terminal};

const DOTS_X: usize = 2;
const DOTS_Y: usize = 4;

pub struct Raster {
    cols: usize,
    rows: usize,
    dot_w: usize,
    dot_h: usize,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    sky: Rgba,
    dots: Vec<bool>,
    ink: Vec<Option<Rgba>>,
    // cells covered by the shape being drawn, inked once it is finished
    touched: Vec<bool>,
    stroke: Vec<usize>,
}

impl Raster {
    pub fn new(cols: u16, rows: u16, world_width: f32, world_height: f32, sky: Rgba) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        let dot_w = cols * DOTS_X;
        let dot_h = rows * DOTS_Y;
        let scale = (dot_w as f32 / world_width).min(dot_h as f32 / world_height);

        Self {
            cols,
            rows,
            dot_w,
            dot_h,
            scale,
            offset_x: (dot_w as f32 - world_width * scale) / 2.0,
            offset_y: dot_h as f32 - world_height * scale,
            sky,
            dots: vec![false; dot_w * dot_h],
            ink: vec![None; cols * rows],
            touched: vec![false; cols * rows],
            stroke: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.dots.fill(false);
        self.ink.fill(None);
    }

    /// World point to fractional dot coordinates
    pub fn to_dots(&self, p: Point) -> (f32, f32) {
        (self.offset_x + p.x * self.scale, self.offset_y + p.y * self.scale)
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.dot_w && y < self.dot_h && self.dots[y * self.dot_w + x]
    }

    pub fn ink_at(&self, col: usize, row: usize) -> Option<Rgba> {
        self.ink.get(row * self.cols + col).copied().flatten()
    }

    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.dot_w as i32 || y >= self.dot_h as i32 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        self.dots[y * self.dot_w + x] = true;

        let cell = (y / DOTS_Y) * self.cols + x / DOTS_X;
        if !self.touched[cell] {
            self.touched[cell] = true;
            self.stroke.push(cell);
        }
    }

    /// Ink every cell the current shape covered, once per cell
    fn finish(&mut self, color: Rgba) {
        for cell in self.stroke.drain(..) {
            self.touched[cell] = false;
            let base = self.ink[cell].unwrap_or(self.sky);
            self.ink[cell] = Some(blend(base, color));
        }
    }

    /// Square brush of `half` dots around (x, y)
    fn stamp(&mut self, x: i32, y: i32, half: i32) {
        for oy in -half..=half {
            for ox in -half..=half {
                self.plot(x + ox, y + oy);
            }
        }
    }

    /// Copy the dots into the terminal back buffer
    pub fn blit(&self, term: &mut Terminal) {
        let sky = rgb(self.sky.r, self.sky.g, self.sky.b);

        for cy in 0..self.rows {
            let by = cy * DOTS_Y;
            for cx in 0..self.cols {
                let bx = cx * DOTS_X;
                term.set_bg(cx as i32, cy as i32, sky);

                let mut dots: u8 = 0;
                if self.is_set(bx, by) { dots |= 0x01; }
                if self.is_set(bx, by + 1) { dots |= 0x02; }
                if self.is_set(bx, by + 2) { dots |= 0x04; }
                if self.is_set(bx + 1, by) { dots |= 0x08; }
                if self.is_set(bx + 1, by + 1) { dots |= 0x10; }
                if self.is_set(bx + 1, by + 2) { dots |= 0x20; }
                if self.is_set(bx, by + 3) { dots |= 0x40; }
                if self.is_set(bx + 1, by + 3) { dots |= 0x80; }

                if dots > 0 {
                    let ch = char::from_u32(0x2800 + dots as u32).unwrap_or(' ');
                    let ink = self.ink_at(cx, cy).unwrap_or(self.sky);
                    term.set(cx as i32, cy as i32, ch, Some(rgb(ink.r, ink.g, ink.b)), false);
                }
            }
        }
    }
}

/// `over` composited onto an opaque `base`
fn blend(base: Rgba, over: Rgba) -> Rgba {
    let a = over.a as f32 / 255.0;
    let mix = |b: u8, o: u8| (b as f32 * (1.0 - a) + o as f32 * a).round() as u8;
    Rgba::rgb(mix(base.r, over.r), mix(base.g, over.g), mix(base.b, over.b))
}

impl Canvas for Raster {
    fn line(&mut self, from: Point, to: Point, thickness: f32, color: Rgba) {
        let (x0, y0) = self.to_dots(from);
        let (x1, y1) = self.to_dots(to);
        let half = ((thickness * self.scale) / 2.0).floor() as i32;

        let (mut x, mut y) = (x0 as i32, y0 as i32);
        let (bx1, by1) = (x1 as i32, y1 as i32);

        let dx = (bx1 - x).abs();
        let dy = -(by1 - y).abs();
        let sx = if x < bx1 { 1 } else { -1 };
        let sy = if y < by1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x, y, half);
            if x == bx1 && y == by1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        self.finish(color);
    }

    fn ellipse(&mut self, shape: Ellipse) {
        let (cx, cy) = self.to_dots(shape.center);
        let reach = shape.radius_x.max(shape.radius_y) * self.scale;
        let (sin, cos) = shape.rotation.to_radians().sin_cos();

        let x_min = (cx - reach).floor() as i32;
        let x_max = (cx + reach).ceil() as i32;
        let y_min = (cy - reach).floor() as i32;
        let y_max = (cy + reach).ceil() as i32;

        let mut hit = false;
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                // dot centre back in world units, relative to the ellipse centre
                let px = (x as f32 + 0.5 - cx) / self.scale;
                let py = (y as f32 + 0.5 - cy) / self.scale;
                let u = px * cos + py * sin;
                let v = -px * sin + py * cos;
                let r = (u / shape.radius_x).powi(2) + (v / shape.radius_y).powi(2);
                if r <= 1.0 {
                    self.plot(x, y);
                    hit = true;
                }
            }
        }

        // too small for any dot centre: keep it visible as a single dot
        if !hit {
            self.plot(cx as i32, cy as i32);
        }
        self.finish(shape.fill);
    }
}
