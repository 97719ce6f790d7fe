//! Per-frame world update
//!
//! Spawns, scrolls, resolves player contacts, culls, then integrates the
//! player. Only runs while the Playing screen is active.

use rand::Rng;

use super::spawn::spawn_frame;
use super::state::{RunState, World};
use crate::consts::SCROLL_SPEED;
use crate::tuning::{ObstacleEffect, Tuning};

/// What happened to the player this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Collectibles picked up
    pub collected: u32,
    /// Obstacles touched
    pub hits: u32,
    /// An obstacle contact made the player jump
    pub auto_jumped: bool,
}

/// Whole-pixel scroll step for one frame
#[inline]
pub fn scroll_step(dt: f32) -> f32 {
    (SCROLL_SPEED * dt.max(0.0)).trunc()
}

/// Advance the world by one frame
pub fn tick<R: Rng>(
    world: &mut World,
    run: &mut RunState,
    tuning: &Tuning,
    rng: &mut R,
    dt: f32,
) -> FrameReport {
    let mut report = FrameReport::default();

    spawn_frame(world, tuning.spawn, rng);

    world.scroll_x += SCROLL_SPEED * dt.max(0.0);
    let step = scroll_step(dt);
    let player_rect = world.player.rect();

    let mut jump = false;
    world.obstacles.retain_mut(|obstacle| {
        obstacle.scroll(step);
        if !player_rect.intersects(&obstacle.rect) {
            return !obstacle.is_offscreen();
        }
        report.hits += 1;
        match tuning.obstacle_effect {
            ObstacleEffect::AutoJump => {
                jump = true;
                !obstacle.is_offscreen()
            }
            ObstacleEffect::Penalty => {
                run.penalize();
                false
            }
        }
    });
    if jump {
        report.auto_jumped = world.player.jump();
    }

    world.collectibles.retain_mut(|collectible| {
        collectible.scroll(step);
        if player_rect.intersects(&collectible.rect) {
            run.collect();
            report.collected += 1;
            return false;
        }
        !collectible.is_offscreen()
    });

    world.player.integrate(dt);

    report
}
