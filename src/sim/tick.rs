//! Fixed timestep simulation tick
//!
//! Advances the whole level by exactly one step: player, then enemies, then
//! the outcome check.

use glam::Vec2;

use super::collision::touching;
use super::state::{GameState, Outcome};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Held down: hide instead of walking
    pub down: bool,
    /// One-shot jump request
    pub jump: bool,
}

impl TickInput {
    /// Left wins over right, right over hiding
    pub fn movement(&self) -> (Vec2, bool) {
        if self.left {
            (Vec2::new(-1.0, 0.0), false)
        } else if self.right {
            (Vec2::new(1.0, 0.0), false)
        } else {
            (Vec2::ZERO, self.down)
        }
    }
}

/// Advance the game state by one fixed timestep.
///
/// Returns the new outcome if this step ended the session. Does nothing once
/// the session has ended.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Option<Outcome> {
    if !state.session.is_running() {
        return None;
    }
    state.time_ticks += 1;

    update_player(state, input, dt);

    for enemy in &mut state.enemies {
        enemy.update(
            dt,
            &state.player,
            &state.platforms,
            &mut state.rng_state,
            &state.tuning,
        );
    }

    // Fresh positions on both sides: contact is checked after everyone moved
    let caught = !state.player.hidden
        && state
            .enemies
            .iter()
            .any(|e| touching(&state.player, &e.body));
    state.player.collisions.enemy = caught;

    evaluate_outcome(state)
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    let (movement, hide) = input.movement();
    if movement.x < 0.0 {
        player.move_left();
    } else if movement.x > 0.0 {
        player.move_right();
    } else {
        player.set_movement(movement);
    }
    player.hidden = hide;

    // Uses last step's ground contact, before flags are cleared
    if input.jump && player.jump() {
        log::debug!("player jumped from {:?}", player.pos);
    }

    player.update(dt, &state.platforms);

    let clamped = player.pos.x.clamp(tuning.left_border, tuning.right_border);
    if clamped != player.pos.x {
        player.pos.x = clamped;
        player.vel.x = 0.0;
    }
}

/// LOST is checked before WON, so touching an enemy on the goal still loses
pub fn evaluate_outcome(state: &mut GameState) -> Option<Outcome> {
    let next = if state.player.collisions.enemy {
        Outcome::Lost
    } else if state.in_win_region(state.player.pos) {
        Outcome::Won
    } else {
        return None;
    };

    if state.session.finish(next) {
        log::info!(
            "session ended: {:?} at tick {} (player at {:?})",
            next,
            state.time_ticks,
            state.player.pos
        );
        Some(next)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::Entity;

    /// Run idle steps until the player settles on the ground
    fn settled_state() -> GameState {
        let mut state = GameState::new(12345);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.player.collisions.bottom);
        state
    }

    #[test]
    fn test_player_falls_onto_ground() {
        let state = settled_state();
        // Ground top is -2.825, player half-height 0.22
        assert!((state.player.pos.y - (-2.605)).abs() < 0.01);
        assert_eq!(state.outcome(), Outcome::Running);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut state = settled_state();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(!state.player.collisions.bottom);
        assert!(state.player.vel.y > 0.0);
        assert!(state.player.pos.y > -2.605);
    }

    #[test]
    fn test_airborne_jump_request_ignored() {
        let mut state = GameState::new(1);
        // Airborne in the gap between the ground and the stair row
        state.player.pos = Vec2::new(-4.0, -1.6);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.player.collisions.bottom);
        let vy = state.player.vel.y;
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.vel.y < vy);
    }

    #[test]
    fn test_hiding_stops_movement_and_jump() {
        let mut state = settled_state();
        let x = state.player.pos.x;
        let input = TickInput {
            down: true,
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.hidden);
        assert_eq!(state.player.pos.x, x);
        assert!(state.player.collisions.bottom);
    }

    #[test]
    fn test_left_beats_right() {
        let input = TickInput {
            left: true,
            right: true,
            down: true,
            jump: false,
        };
        assert_eq!(input.movement(), (Vec2::new(-1.0, 0.0), false));
    }

    #[test]
    fn test_player_clamped_to_borders() {
        let mut state = settled_state();
        state.player.pos.x = LEFT_BORDER + 0.01;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.player.pos.x, LEFT_BORDER);
    }

    #[test]
    fn test_enemy_contact_loses_same_step() {
        let mut state = settled_state();
        // Park a tiny player inside the guard's box
        let guard_pos = state.enemies[0].body.pos;
        state.player.pos = guard_pos;
        state.player.vel = Vec2::ZERO;
        assert!(state.enemies[0].body.aabb().contains(&state.player.aabb()));

        let outcome = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.collisions.enemy);
        assert_eq!(outcome, Some(Outcome::Lost));
        assert_eq!(state.outcome(), Outcome::Lost);
    }

    #[test]
    fn test_hidden_player_is_not_caught() {
        let mut state = settled_state();
        state.player.pos = state.enemies[0].body.pos;
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &input, SIM_DT);
        assert!(!state.player.collisions.enemy);
        assert_eq!(outcome, None);
    }

    #[test]
    fn test_reaching_target_wins() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(WIN_X, WIN_Y + 0.2);
        let outcome = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(outcome, Some(Outcome::Won));
    }

    #[test]
    fn test_evaluate_outcome_lost_beats_won() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(WIN_X, WIN_Y);
        state.player.collisions.enemy = true;
        assert_eq!(evaluate_outcome(&mut state), Some(Outcome::Lost));

        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(WIN_X, WIN_Y);
        assert_eq!(evaluate_outcome(&mut state), Some(Outcome::Won));
    }

    #[test]
    fn test_simultaneous_contact_on_goal_loses() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(WIN_X + 0.01, WIN_Y + 0.3);
        // Hover an extra enemy-sized platform-free monster right on the goal
        let mut monster = state.enemies[0].clone();
        monster.body.pos = state.player.pos;
        monster.body.accel = Vec2::ZERO;
        state.enemies.push(monster);

        let outcome = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(outcome, Some(Outcome::Lost));
    }

    #[test]
    fn test_terminal_outcome_freezes_state() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(WIN_X, WIN_Y + 0.2);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.outcome(), Outcome::Won);

        let frozen: Vec<Vec2> = state.enemies.iter().map(|e| e.body.pos).collect();
        let player_pos = state.player.pos;
        let ticks = state.time_ticks;
        for _ in 0..100 {
            let input = TickInput {
                right: true,
                jump: true,
                ..Default::default()
            };
            assert_eq!(tick(&mut state, &input, SIM_DT), None);
        }
        assert_eq!(state.outcome(), Outcome::Won);
        assert_eq!(state.player.pos, player_pos);
        assert_eq!(state.time_ticks, ticks);
        let now: Vec<Vec2> = state.enemies.iter().map(|e| e.body.pos).collect();
        assert_eq!(frozen, now);
    }

    #[test]
    fn test_platforms_never_move() {
        let mut state = GameState::new(3);
        let before: Vec<Entity> = state.platforms.clone();
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut state, &input, SIM_DT);
        }
        for (a, b) in before.iter().zip(&state.platforms) {
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player.pos, state2.player.pos);
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.body.pos, b.body.pos);
            assert_eq!(a.behavior(), b.behavior());
        }
    }

    #[test]
    fn test_collision_flags_not_stale() {
        let mut state = settled_state();
        assert!(state.player.collisions.bottom);
        // Lift the player into open air; the next step must clear the ground flag
        state.player.pos.y = 2.5;
        state.player.pos.x = -4.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.player.collisions.bottom);
    }
}
