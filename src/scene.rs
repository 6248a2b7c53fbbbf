//! Tree level, live petals and the transitions between frames

use crate::canvas::Canvas;
use crate::config::MAX_LEVEL;
use crate::petal::Petal;
use crate::tree::{collect_tips, draw_branch, BranchSpec};
use crossterm::event::{KeyCode, KeyModifiers};
use rand::prelude::*;
use tracing::{debug, info};

/// Petals shaken loose from every blossoming tip
pub const PETALS_PER_TIP: usize = 5;

/// What a keypress asked for
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Help,
}

pub struct Scene {
    level: u32,
    petals: Vec<Petal>,
    paused: bool,
    world_width: f32,
    world_height: f32,
}

impl Scene {
    pub fn new(level: u32, world_width: f32, world_height: f32) -> Self {
        Self {
            level: level.min(MAX_LEVEL),
            petals: Vec::new(),
            paused: false,
            world_width,
            world_height,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn petal_count(&self) -> usize {
        self.petals.len()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn trunk(&self) -> BranchSpec {
        BranchSpec::trunk(self.world_width, self.world_height, self.level)
    }

    /// Grow one level, up to `MAX_LEVEL`
    pub fn raise(&mut self) {
        if self.level < MAX_LEVEL {
            self.level += 1;
            info!(level = self.level, "tree grown");
        }
    }

    /// Prune one level, shaking petals off every current tip.
    /// Returns how many petals were spawned.
    pub fn lower(&mut self, rng: &mut StdRng) -> usize {
        if self.level == 0 {
            return 0;
        }

        let tips = collect_tips(rng, self.trunk());
        let before = self.petals.len();
        for tip in &tips {
            for _ in 0..PETALS_PER_TIP {
                self.petals.push(Petal::new(tip.x, tip.y, rng));
            }
        }
        self.level -= 1;

        let spawned = self.petals.len() - before;
        info!(level = self.level, tips = tips.len(), spawned, "tree pruned");
        spawned
    }

    /// Advance every petal one frame and drop the ones that are gone
    pub fn step(&mut self) {
        if self.paused {
            return;
        }
        let height = self.world_height;
        let before = self.petals.len();
        self.petals.retain_mut(|petal| {
            petal.update(height);
            !petal.is_off_screen(height)
        });
        let landed = before - self.petals.len();
        if landed > 0 {
            debug!(landed, live = self.petals.len(), "petals landed");
        }
    }

    /// Render pass: tree first, falling petals on top
    pub fn draw<C: Canvas>(&self, canvas: &mut C, rng: &mut StdRng) {
        draw_branch(canvas, rng, self.trunk(), None);
        for petal in &self.petals {
            petal.draw(canvas);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers, rng: &mut StdRng) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('?') => return Action::Help,
            KeyCode::Up | KeyCode::Char('k') => self.raise(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.lower(rng);
            }
            KeyCode::Char(' ') => self.paused = !self.paused,
            _ => {}
        }
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::Recorder;
    use crate::config::{WORLD_HEIGHT, WORLD_WIDTH};

    fn scene(level: u32) -> Scene {
        Scene::new(level, WORLD_WIDTH, WORLD_HEIGHT)
    }

    #[test]
    fn raise_stops_at_ten() {
        let mut s = scene(9);
        s.raise();
        s.raise();
        s.raise();
        assert_eq!(s.level(), 10);
    }

    #[test]
    fn initial_level_is_clamped() {
        assert_eq!(scene(99).level(), MAX_LEVEL);
    }

    #[test]
    fn lower_at_zero_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = scene(0);
        assert_eq!(s.lower(&mut rng), 0);
        assert_eq!(s.level(), 0);
        assert_eq!(s.petal_count(), 0);
    }

    #[test]
    fn lower_spawns_five_per_tip() {
        let mut rng = StdRng::seed_from_u64(1);
        for m in 1..=MAX_LEVEL {
            let mut s = scene(m);
            let tips = (1usize << m) + (1usize << (m - 1));
            assert_eq!(s.lower(&mut rng), PETALS_PER_TIP * tips);
            assert_eq!(s.petal_count(), PETALS_PER_TIP * tips);
            assert_eq!(s.level(), m - 1);
        }
    }

    #[test]
    fn lowering_to_zero_never_goes_negative() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = scene(2);
        s.lower(&mut rng);
        s.lower(&mut rng);
        s.lower(&mut rng);
        assert_eq!(s.level(), 0);
        // 5 * (4 + 2) + 5 * (2 + 1)
        assert_eq!(s.petal_count(), 45);
    }

    #[test]
    fn petals_eventually_all_land() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = scene(4);
        s.lower(&mut rng);
        assert!(s.petal_count() > 0);
        for _ in 0..2000 {
            s.step();
        }
        assert_eq!(s.petal_count(), 0);
    }

    #[test]
    fn pause_freezes_petals() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = scene(3);
        s.lower(&mut rng);
        let count = s.petal_count();
        s.handle_key(KeyCode::Char(' '), KeyModifiers::NONE, &mut rng);
        assert!(s.is_paused());
        for _ in 0..2000 {
            s.step();
        }
        assert_eq!(s.petal_count(), count);
    }

    #[test]
    fn keys_drive_level() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = scene(5);
        assert_eq!(s.handle_key(KeyCode::Up, KeyModifiers::NONE, &mut rng), Action::None);
        assert_eq!(s.level(), 6);
        s.handle_key(KeyCode::Down, KeyModifiers::NONE, &mut rng);
        s.handle_key(KeyCode::Char('j'), KeyModifiers::NONE, &mut rng);
        assert_eq!(s.level(), 4);
        assert_eq!(s.handle_key(KeyCode::Esc, KeyModifiers::NONE, &mut rng), Action::Quit);
        assert_eq!(s.handle_key(KeyCode::Char('?'), KeyModifiers::NONE, &mut rng), Action::Help);
    }

    #[test]
    fn draw_puts_petals_over_tree() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut s = scene(2);
        s.lower(&mut rng);
        let mut rec = Recorder::default();
        s.draw(&mut rec, &mut rng);

        assert_eq!(rec.lines().count(), 3);
        let last = rec.ellipses().last().unwrap();
        assert!(last.radius_y < last.radius_x);
    }
}
