//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives here; the session owns one of
//! each and nothing is global.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::content::{Choice, ChoiceOption, DecisionPoint};

/// The runner. Horizontal position is fixed; the world scrolls instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    /// Feet position (bottom of the collision box)
    pub y: f32,
    /// Vertical velocity (pixels/s, negative is up)
    pub vy: f32,
    pub grounded: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y,
            vy: 0.0,
            grounded: true,
        }
    }
}

impl Player {
    /// Collision box, recomputed from the current position on pixel boundaries
    pub fn rect(&self) -> Rect {
        Rect::new(self.x.floor(), self.y.floor() - PLAYER_H, PLAYER_W, PLAYER_H)
    }

    /// Advance vertical motion by `dt` seconds.
    ///
    /// Gravity only accumulates while airborne. Reaching the ground line
    /// snaps the player onto it; a player leaving the ground on this very
    /// frame (rising from exactly the ground line) is left airborne.
    pub fn integrate(&mut self, dt: f32) {
        if !self.grounded {
            self.vy += GRAVITY * dt;
        }
        self.y += self.vy * dt;

        let rising = self.vy < 0.0;
        if self.y > GROUND_Y || (self.y >= GROUND_Y && !rising) {
            self.y = GROUND_Y;
            self.vy = 0.0;
            self.grounded = true;
        }
    }

    /// Jump if standing on the ground. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vy = JUMP_VELOCITY;
        self.grounded = false;
        true
    }
}

/// Entity kinds that scroll through the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Collectible,
}

/// An obstacle or collectible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub rect: Rect,
}

impl Entity {
    /// Move left by whole pixels
    pub fn scroll(&mut self, step: f32) {
        self.rect.pos.x -= step;
    }

    /// Right edge has passed the left edge of the viewport
    pub fn is_offscreen(&self) -> bool {
        self.rect.right() < 0.0
    }
}

/// Everything that moves during Playing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    /// Sorted by id (spawn order)
    pub obstacles: Vec<Entity>,
    /// Sorted by id (spawn order)
    pub collectibles: Vec<Entity>,
    /// Total scrolled distance since level reset (pixels)
    pub scroll_x: f32,
    next_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            player: Player::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            scroll_x: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear entities and put the player back on the ground
    pub fn reset_level(&mut self) {
        self.player = Player::default();
        self.obstacles.clear();
        self.collectibles.clear();
        self.scroll_x = 0.0;
    }

    pub fn spawn(&mut self, kind: EntityKind, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        let entity = Entity { id, kind, rect };
        match kind {
            EntityKind::Obstacle => self.obstacles.push(entity),
            EntityKind::Collectible => self.collectibles.push(entity),
        }
        id
    }
}

/// How a decision got committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// Player clicked a card
    Clicked,
    /// Countdown reached zero and the default card was taken
    TimedOut,
}

/// One committed decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecisionRecord {
    pub choice: Choice,
    pub resolution: Resolution,
}

/// Aggregate of one session: score and choices
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunState {
    pub score: u32,
    pub first: Option<DecisionRecord>,
    pub second: Option<DecisionRecord>,
}

impl RunState {
    pub fn collect(&mut self) {
        self.score += 1;
    }

    /// Lose a point, never going below zero
    pub fn penalize(&mut self) {
        self.score = self.score.saturating_sub(1);
    }

    pub fn decision(&self, point: DecisionPoint) -> Option<DecisionRecord> {
        match point {
            DecisionPoint::First => self.first,
            DecisionPoint::Second => self.second,
        }
    }

    /// Commit a decision. A decision point is committed at most once;
    /// returns false if it already was.
    pub fn commit(&mut self, point: DecisionPoint, choice: Choice, resolution: Resolution) -> bool {
        let slot = match point {
            DecisionPoint::First => &mut self.first,
            DecisionPoint::Second => &mut self.second,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(DecisionRecord { choice, resolution });
        true
    }

    pub fn option(&self, point: DecisionPoint) -> Option<&'static ChoiceOption> {
        self.decision(point).map(|d| point.option(d.choice))
    }

    pub fn clear_choices(&mut self) {
        self.first = None;
        self.second = None;
    }
}

/// Transient message after a pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tip {
    pub message: &'static str,
    /// Level clock reading when shown
    pub shown_at: f32,
}

impl Tip {
    pub fn is_expired(&self, now: f32) -> bool {
        now - self.shown_at >= TIP_SECONDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_player_starts_grounded_on_ground_line() {
        let p = Player::default();
        assert!(p.grounded);
        assert_eq!(p.y, GROUND_Y);
        assert_eq!(p.rect().bottom(), GROUND_Y.floor());
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut p = Player::default();
        assert!(p.jump());
        assert_eq!(p.vy, JUMP_VELOCITY);
        assert!(!p.grounded);

        p.integrate(1.0 / 60.0);
        let vy = p.vy;
        assert!(!p.jump());
        assert_eq!(p.vy, vy);
    }

    #[test]
    fn test_jump_lands_back_on_ground() {
        let mut p = Player::default();
        p.jump();
        let mut apex = p.y;
        for _ in 0..120 {
            p.integrate(1.0 / 60.0);
            apex = apex.min(p.y);
        }
        assert!(p.grounded);
        assert_eq!(p.y, GROUND_Y);
        assert_eq!(p.vy, 0.0);
        // v² / 2g ≈ 128px
        assert!(GROUND_Y - apex > 110.0);
    }

    #[test]
    fn test_zero_dt_after_jump_keeps_jump() {
        let mut p = Player::default();
        p.jump();
        p.integrate(0.0);
        assert!(!p.grounded);
        assert_eq!(p.vy, JUMP_VELOCITY);
    }

    #[test]
    fn test_penalty_clamps_at_zero() {
        let mut run = RunState::default();
        run.penalize();
        assert_eq!(run.score, 0);
        run.collect();
        run.collect();
        run.penalize();
        assert_eq!(run.score, 1);
    }

    #[test]
    fn test_commit_once_per_point() {
        let mut run = RunState::default();
        assert!(run.commit(DecisionPoint::First, Choice::A, Resolution::Clicked));
        assert!(!run.commit(DecisionPoint::First, Choice::B, Resolution::TimedOut));
        let d = run.decision(DecisionPoint::First).unwrap();
        assert_eq!(d.choice, Choice::A);
        assert_eq!(d.resolution, Resolution::Clicked);
        assert_eq!(run.option(DecisionPoint::First).unwrap().id, "21_inovacao");
        assert!(run.decision(DecisionPoint::Second).is_none());
    }

    #[test]
    fn test_world_ids_increase() {
        let mut w = World::new();
        let a = w.spawn(EntityKind::Obstacle, Rect::new(0.0, 0.0, 1.0, 1.0));
        let b = w.spawn(EntityKind::Collectible, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(b > a);
        w.reset_level();
        assert!(w.obstacles.is_empty() && w.collectibles.is_empty());
        assert!(w.spawn(EntityKind::Obstacle, Rect::new(0.0, 0.0, 1.0, 1.0)) > b);
    }

    #[test]
    fn test_tip_expires_after_two_seconds() {
        let tip = Tip { message: "x", shown_at: 1.0 };
        assert!(!tip.is_expired(2.9));
        assert!(tip.is_expired(3.0));
    }

    proptest! {
        #[test]
        fn prop_integration_never_below_ground(
            start_y in 0.0f32..GROUND_Y,
            vy in -1000.0f32..1000.0,
            dts in proptest::collection::vec(0.0f32..0.1, 1..200),
        ) {
            let mut p = Player { x: PLAYER_X, y: start_y, vy, grounded: false };
            for dt in dts {
                p.integrate(dt);
                prop_assert!(p.y <= GROUND_Y);
                if p.grounded {
                    prop_assert_eq!(p.y, GROUND_Y);
                    prop_assert_eq!(p.vy, 0.0);
                }
            }
        }

        #[test]
        fn prop_jump_is_noop_when_airborne(y in 0.0f32..GROUND_Y, vy in -1000.0f32..1000.0) {
            let mut p = Player { x: PLAYER_X, y, vy, grounded: false };
            let before = p;
            prop_assert!(!p.jump());
            prop_assert_eq!(p, before);
        }

        #[test]
        fn prop_score_never_negative(ops in proptest::collection::vec(any::<bool>(), 0..100)) {
            let mut run = RunState::default();
            for collect in ops {
                let before = run.score;
                if collect {
                    run.collect();
                } else {
                    run.penalize();
                    prop_assert_eq!(run.score, before.saturating_sub(1));
                }
            }
        }
    }
}
