//! Falling petals shaken loose when the tree is pruned

use crate::canvas::{Canvas, Ellipse, Point, Rgba};
use crate::tree::pink;
use rand::prelude::*;

// Physics constants, per frame
const GRAVITY: f32 = 0.1;
const DRAG: f32 = 0.99;
const DRIFT_FREQUENCY: f32 = 0.01;
const DRIFT_STRENGTH: f32 = 0.1;
const FADE_BAND: f32 = 100.0;
const FADE_STEP: u8 = 2;
const SQUASH: f32 = 0.6;

pub struct Petal {
    pub position: Point,
    pub velocity: Point,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub size: f32,
    pub opacity: u8,
    pub color: Rgba,
}

impl Petal {
    pub fn new(x: f32, y: f32, rng: &mut StdRng) -> Self {
        Self {
            position: Point::new(x, y),
            velocity: Point::new(rng.gen_range(-2.0..2.0), rng.gen_range(1.0..3.0)),
            rotation: rng.gen_range(0.0..360.0),
            rotation_speed: rng.gen_range(-5.0..5.0),
            size: rng.gen_range(4.0..10.0),
            opacity: 255,
            color: pink(rng),
        }
    }

    /// Advance one frame
    pub fn update(&mut self, world_height: f32) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        self.rotation += self.rotation_speed;

        self.velocity.y += GRAVITY;
        self.velocity.x *= DRAG;
        self.velocity.x += (self.position.y * DRIFT_FREQUENCY).sin() * DRIFT_STRENGTH;

        if self.position.y > world_height - FADE_BAND && self.opacity > FADE_STEP {
            self.opacity -= FADE_STEP;
        }
    }

    pub fn is_off_screen(&self, world_height: f32) -> bool {
        self.position.y > world_height || self.opacity == 0
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.ellipse(Ellipse {
            center: self.position,
            radius_x: self.size,
            radius_y: self.size * SQUASH,
            rotation: self.rotation,
            fill: self.color.with_alpha(self.opacity),
        });
    }
}
