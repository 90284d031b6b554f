//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`, which is owned by
//! the loop driver and handed to each step explicitly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::behavior::Enemy;
use super::entity::Entity;
use super::level;
use crate::tuning::Tuning;

/// Session outcome. Leaving `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Running,
    Lost,
    Won,
}

/// Outcome plus the delayed jump-scare bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    outcome: Outcome,
    /// Update ticks spent in `Lost`
    pub scare_counter: u32,
    /// Scream already fired
    pub screamed: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            outcome: Outcome::Running,
            scare_counter: 0,
            screamed: false,
        }
    }
}

impl Session {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_running(&self) -> bool {
        self.outcome == Outcome::Running
    }

    /// Move out of `Running`. Returns false (and changes nothing) if already ended.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if !self.is_running() || outcome == Outcome::Running {
            return false;
        }
        self.outcome = outcome;
        true
    }

    /// Count one update tick after losing. Returns true exactly once: on the
    /// tick the counter first reaches `scream_at`.
    pub fn advance_scare(&mut self, scream_at: u32) -> bool {
        if self.outcome != Outcome::Lost {
            return false;
        }
        self.scare_counter = self.scare_counter.saturating_add(1);
        if self.scare_counter >= scream_at && !self.screamed {
            self.screamed = true;
            return true;
        }
        false
    }

    /// Jump-scare image is up
    pub fn jump_scare_visible(&self, show_at: u32) -> bool {
        self.outcome == Outcome::Lost && self.scare_counter >= show_at
    }
}

/// Seeded RNG state. Each draw reseeds from (seed, draws) so the sequence is
/// reproducible and survives serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.draws.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// `base` +/- up to `spread`, never below 1
    pub fn jitter(&mut self, base: u32, spread: u32) -> u32 {
        let mut rng = self.to_rng();
        self.draws += 1;
        if spread == 0 {
            return base.max(1);
        }
        let offset = rng.random_range(-(spread as i64)..=spread as i64);
        (base as i64 + offset).max(1) as u32
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub session: Session,
    pub player: Entity,
    /// Static level geometry, in collision-test order
    pub platforms: Vec<Entity>,
    pub enemies: Vec<Enemy>,
    pub background: Entity,
    /// Goal marker (drawn only; the win check uses the tuning threshold)
    pub target: Entity,
    pub jump_scare: Entity,
}

impl GameState {
    /// Create the fixed level with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = level::player(&tuning);
        let platforms = level::platforms();
        let enemies = level::enemies(&tuning);
        let (background, target, jump_scare) = level::props();
        log::info!(
            "level built: {} platforms, {} enemies, seed {}",
            platforms.len(),
            enemies.len(),
            seed
        );
        Self {
            seed,
            rng_state: RngState::new(seed),
            tuning,
            time_ticks: 0,
            session: Session::default(),
            player,
            platforms,
            enemies,
            background,
            target,
            jump_scare,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.session.outcome()
    }

    /// Player has reached the goal corner
    pub fn in_win_region(&self, pos: Vec2) -> bool {
        pos.x >= self.tuning.win_x && pos.y >= self.tuning.win_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_outcome_is_terminal() {
        let mut s = Session::default();
        assert!(s.is_running());
        assert!(s.finish(Outcome::Won));
        assert!(!s.finish(Outcome::Lost));
        assert_eq!(s.outcome(), Outcome::Won);
        assert!(!s.finish(Outcome::Running));
    }

    #[test]
    fn test_scream_fires_once_at_threshold() {
        let mut s = Session::default();
        assert!(!s.advance_scare(SCREAM_DELAY_TICKS));
        assert_eq!(s.scare_counter, 0);

        s.finish(Outcome::Lost);
        let mut fired_at = Vec::new();
        for tick in 1..=400u32 {
            if s.advance_scare(SCREAM_DELAY_TICKS) {
                fired_at.push(tick);
            }
            assert_eq!(
                s.jump_scare_visible(JUMP_SCARE_DELAY_TICKS),
                tick >= JUMP_SCARE_DELAY_TICKS
            );
        }
        assert_eq!(fired_at, vec![SCREAM_DELAY_TICKS]);
        assert!(s.screamed);
    }

    #[test]
    fn test_won_session_never_screams() {
        let mut s = Session::default();
        s.finish(Outcome::Won);
        for _ in 0..500 {
            assert!(!s.advance_scare(SCREAM_DELAY_TICKS));
        }
        assert_eq!(s.scare_counter, 0);
        assert!(!s.jump_scare_visible(JUMP_SCARE_DELAY_TICKS));
    }

    #[test]
    fn test_rng_jitter_is_reproducible_and_bounded() {
        let mut a = RngState::new(42);
        let mut b = RngState::new(42);
        for _ in 0..100 {
            let x = a.jitter(90, 20);
            assert_eq!(x, b.jitter(90, 20));
            assert!((70..=110).contains(&x));
        }
        assert_eq!(RngState::new(1).jitter(0, 0), 1);
    }

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(12345);
        assert_eq!(state.outcome(), Outcome::Running);
        assert_eq!(state.platforms.len(), 45);
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.player.pos, Vec2::new(-4.0, -2.0));
        assert!(state.platforms.iter().all(|p| p.collides()));
    }

    #[test]
    fn test_win_region() {
        let state = GameState::new(1);
        assert!(state.in_win_region(Vec2::new(4.5, 1.57)));
        assert!(!state.in_win_region(Vec2::new(4.49, 1.6)));
        assert!(!state.in_win_region(Vec2::new(4.6, 1.5)));
    }
}
