//! Recursive cherry blossom tree

use crate::canvas::{Canvas, Ellipse, Point, Rgba};
use crate::config::{palette, MAX_LEVEL, TRUNK_BASE_OFFSET, TRUNK_LENGTH};
use rand::prelude::*;

// Growth constants
const LENGTH_DECAY: f32 = 0.75;
const SPREAD_DEGREES: f32 = 25.0;

// Blossom cluster constants
const CLUSTER_JITTER: f32 = 15.0;
const PETALS_PER_BLOSSOM: u32 = 5;
const PETAL_STEP_DEGREES: f32 = 72.0;
const PETAL_ANGLE_JITTER: f32 = 10.0;

/// One node of the branch recursion
#[derive(Clone, Copy, Debug)]
pub struct BranchSpec {
    pub origin: Point,
    pub length: f32,
    /// Degrees from vertical, positive leans right
    pub angle: f32,
    pub level: u32,
    pub max_level: u32,
}

impl BranchSpec {
    /// Trunk of a tree standing on the bottom of a world of the given size
    pub fn trunk(world_width: f32, world_height: f32, max_level: u32) -> Self {
        Self {
            origin: Point::new(world_width / 2.0, world_height - TRUNK_BASE_OFFSET),
            length: TRUNK_LENGTH,
            angle: 0.0,
            level: 0,
            max_level,
        }
    }

    fn child(&self, origin: Point, spread: f32) -> Self {
        Self {
            origin,
            length: self.length * LENGTH_DECAY,
            angle: self.angle + spread,
            level: self.level + 1,
            max_level: self.max_level,
        }
    }

    /// Blossoms grow on the last two levels
    fn is_tip(&self) -> bool {
        self.level + 1 >= self.max_level && self.level <= self.max_level
    }
}

/// End point of a branch leaving `origin` at `angle` degrees from vertical
pub fn branch_end(origin: Point, length: f32, angle: f32) -> Point {
    let rad = angle.to_radians();
    Point::new(origin.x + length * rad.sin(), origin.y - length * rad.cos())
}

/// Bark colour: dark trunk, fading towards grey-brown twigs
pub fn branch_color(level: u32) -> Rgba {
    if level == 0 {
        return palette::TRUNK;
    }
    let l = level.min(255) as i32;
    let r = (101 - l * 8).max(50);
    let g = (67 - l * 5).max(40);
    let b = (33 - l * 3).max(20);
    Rgba::rgb(r as u8, g as u8, b as u8)
}

pub fn branch_thickness(level: u32) -> f32 {
    (10.0 - level as f32 * 1.5).max(1.0)
}

/// Draw a branch and everything above it.
///
/// When `tips` is given, the end point of every blossoming branch is pushed
/// onto it before its blossoms are drawn. `max_level` is clamped to
/// `MAX_LEVEL`, so the recursion never grows past 2^11 - 1 branches.
pub fn draw_branch<C: Canvas>(
    canvas: &mut C,
    rng: &mut StdRng,
    spec: BranchSpec,
    mut tips: Option<&mut Vec<Point>>,
) {
    let spec = BranchSpec {
        max_level: spec.max_level.min(MAX_LEVEL),
        ..spec
    };
    if spec.level > spec.max_level {
        return;
    }

    let end = branch_end(spec.origin, spec.length, spec.angle);
    canvas.line(
        spec.origin,
        end,
        branch_thickness(spec.level),
        branch_color(spec.level),
    );

    if spec.is_tip() {
        if let Some(tips) = tips.as_deref_mut() {
            tips.push(end);
        }
        draw_cluster(canvas, rng, end);
    }

    draw_branch(canvas, rng, spec.child(end, -SPREAD_DEGREES), tips.as_deref_mut());
    draw_branch(canvas, rng, spec.child(end, SPREAD_DEGREES), tips);
}

/// Run a pass that only records tip positions
pub fn collect_tips(rng: &mut StdRng, spec: BranchSpec) -> Vec<Point> {
    let mut tips = Vec::new();
    draw_branch(&mut crate::canvas::NullCanvas, rng, spec, Some(&mut tips));
    tips
}

/// Either pink tone, coin flip
pub fn pink(rng: &mut StdRng) -> Rgba {
    if rng.gen_bool(0.5) {
        palette::LIGHT_PINK
    } else {
        palette::PINK
    }
}

/// 3-5 five-petalled blossoms scattered around `at`
fn draw_cluster<C: Canvas>(canvas: &mut C, rng: &mut StdRng, at: Point) {
    let count = rng.gen_range(3..6);
    for _ in 0..count {
        let center = Point::new(
            at.x + rng.gen_range(-CLUSTER_JITTER..CLUSTER_JITTER),
            at.y + rng.gen_range(-CLUSTER_JITTER..CLUSTER_JITTER),
        );
        let size: f32 = rng.gen_range(4.0..6.0);

        for j in 0..PETALS_PER_BLOSSOM {
            let angle = (j as f32 * PETAL_STEP_DEGREES + rng.gen_range(0.0..PETAL_ANGLE_JITTER)).to_radians();
            let petal = Point::new(center.x + angle.cos() * size, center.y + angle.sin() * size);
            canvas.ellipse(Ellipse::disc(petal, size * 0.8, pink(rng)));
        }

        canvas.ellipse(Ellipse::disc(center, size * 0.4, palette::BLOSSOM_CENTER));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::Recorder;

    fn near(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn tip_count(max_level: u32) -> usize {
        if max_level == 0 {
            1
        } else {
            (1 << max_level) + (1 << (max_level - 1))
        }
    }

    #[test]
    fn end_point_straight_up() {
        let end = branch_end(Point::new(0.0, 0.0), 100.0, 0.0);
        assert!(near(end, Point::new(0.0, -100.0)));
    }

    #[test]
    fn end_point_sideways() {
        let end = branch_end(Point::new(0.0, 0.0), 100.0, 90.0);
        assert!(near(end, Point::new(100.0, 0.0)));
    }

    #[test]
    fn one_segment_per_node() {
        for m in 0..=MAX_LEVEL {
            let mut rng = StdRng::seed_from_u64(7);
            let mut rec = Recorder::default();
            draw_branch(&mut rec, &mut rng, BranchSpec::trunk(1200.0, 900.0, m), None);
            assert_eq!(rec.lines().count(), (1 << (m + 1)) - 1, "max level {}", m);
        }
    }

    #[test]
    fn depth_is_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut rec = Recorder::default();
        draw_branch(&mut rec, &mut rng, BranchSpec::trunk(1200.0, 900.0, 40), None);
        assert_eq!(rec.lines().count(), (1 << (MAX_LEVEL + 1)) - 1);
    }

    #[test]
    fn tips_cover_last_two_levels() {
        for m in 0..=MAX_LEVEL {
            let mut rng = StdRng::seed_from_u64(1);
            let tips = collect_tips(&mut rng, BranchSpec::trunk(1200.0, 900.0, m));
            assert_eq!(tips.len(), tip_count(m), "max level {}", m);
        }
    }

    #[test]
    fn trunk_alone_blossoms_at_level_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let tips = collect_tips(&mut rng, BranchSpec::trunk(1200.0, 900.0, 0));
        assert!(near(tips[0], Point::new(600.0, 700.0)));
    }

    #[test]
    fn render_pass_collects_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rec = Recorder::default();
        let mut tips = Vec::new();
        draw_branch(&mut rec, &mut rng, BranchSpec::trunk(1200.0, 900.0, 2), Some(&mut tips));
        let collected = tips.len();
        draw_branch(&mut rec, &mut rng, BranchSpec::trunk(1200.0, 900.0, 2), None);
        assert_eq!(tips.len(), collected);
    }

    #[test]
    fn children_shrink_and_spread() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut rec = Recorder::default();
        draw_branch(&mut rec, &mut rng, BranchSpec::trunk(1200.0, 900.0, 1), None);
        let lines: Vec<_> = rec.lines().collect();
        assert_eq!(lines.len(), 3);

        let trunk_end = lines[0].1;
        let left = branch_end(trunk_end, 150.0 * 0.75, -25.0);
        let right = branch_end(trunk_end, 150.0 * 0.75, 25.0);
        assert!(near(lines[1].0, trunk_end));
        assert!(near(lines[1].1, left));
        assert!(near(lines[2].1, right));
    }

    #[test]
    fn clusters_have_five_petals_and_a_center() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut rec = Recorder::default();
        draw_branch(&mut rec, &mut rng, BranchSpec::trunk(1200.0, 900.0, 0), None);

        let shapes: Vec<_> = rec.ellipses().collect();
        assert_eq!(shapes.len() % 6, 0);
        let blossoms = shapes.len() / 6;
        assert!((3..=5).contains(&blossoms));

        for blossom in shapes.chunks(6) {
            for petal in &blossom[..5] {
                assert!(petal.fill == palette::PINK || petal.fill == palette::LIGHT_PINK);
            }
            assert_eq!(blossom[5].fill, palette::BLOSSOM_CENTER);
            assert!((blossom[5].radius_x * 2.0 - blossom[0].radius_x).abs() < 1e-3);
        }
    }

    #[test]
    fn bark_ramp() {
        assert_eq!(branch_color(0), palette::TRUNK);
        assert_eq!(branch_color(1), Rgba::rgb(93, 62, 30));
        assert_eq!(branch_color(10), Rgba::rgb(50, 40, 20));
        assert!((branch_thickness(0) - 10.0).abs() < f32::EPSILON);
        assert!((branch_thickness(2) - 7.0).abs() < f32::EPSILON);
        assert!((branch_thickness(9) - 1.0).abs() < f32::EPSILON);
    }
}
