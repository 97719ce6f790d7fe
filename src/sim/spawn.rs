//! Entity spawning
//!
//! Two policies: a fixed layout built at level reset, and independent
//! per-frame rolls at the right edge of the viewport.

use rand::Rng;

use super::collision::Rect;
use super::state::{EntityKind, World};
use crate::consts::*;
use crate::tuning::SpawnPolicy;

/// Top of pre-populated obstacles
const PREPOPULATED_TOP: f32 = HEIGHT * 0.78;
/// Horizontal jitter applied to each pre-populated obstacle
const POSITION_JITTER: i32 = 60;
/// Collectibles float this far above their obstacle
const COLLECTIBLE_LIFT: f32 = 120.0;
const COLLECTIBLE_SIZE: f32 = 16.0;

/// Per-frame spawns
const STREAM_OBSTACLE_SIZE: f32 = 40.0;
const STREAM_COLLECTIBLE_SIZE: f32 = 20.0;
const STREAM_COLLECTIBLE_TOP: f32 = GROUND_Y - 130.0;

/// Lay out a fresh level. Only the pre-populated policy places anything.
pub fn populate_level<R: Rng>(world: &mut World, policy: SpawnPolicy, rng: &mut R) {
    if policy != SpawnPolicy::Prepopulated {
        return;
    }

    let top = PREPOPULATED_TOP.floor();
    for i in 0..PREPOPULATED_OBSTACLES {
        let x = WIDTH + i as f32 * OBSTACLE_SPACING
            + rng.random_range(-POSITION_JITTER..=POSITION_JITTER) as f32;
        let w = rng.random_range(40..=70) as f32;
        let h = rng.random_range(24..=40) as f32;
        world.spawn(EntityKind::Obstacle, Rect::new(x, top, w, h));

        if rng.random_bool(COLLECTIBLE_CHANCE) {
            let cx = x + (w / 2.0).floor() - COLLECTIBLE_SIZE / 2.0;
            world.spawn(
                EntityKind::Collectible,
                Rect::new(cx, top - COLLECTIBLE_LIFT, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE),
            );
        }
    }

    log::debug!(
        "Level populated: {} obstacles, {} collectibles",
        world.obstacles.len(),
        world.collectibles.len()
    );
}

/// Roll this frame's spawns. Only the per-frame policy spawns here.
pub fn spawn_frame<R: Rng>(world: &mut World, policy: SpawnPolicy, rng: &mut R) {
    if policy != SpawnPolicy::PerFrame {
        return;
    }

    if rng.random_bool(OBSTACLE_SPAWN_CHANCE) {
        world.spawn(
            EntityKind::Obstacle,
            Rect::new(
                WIDTH,
                GROUND_Y - STREAM_OBSTACLE_SIZE,
                STREAM_OBSTACLE_SIZE,
                STREAM_OBSTACLE_SIZE,
            ),
        );
    }
    if rng.random_bool(COLLECTIBLE_SPAWN_CHANCE) {
        world.spawn(
            EntityKind::Collectible,
            Rect::new(
                WIDTH,
                STREAM_COLLECTIBLE_TOP,
                STREAM_COLLECTIBLE_SIZE,
                STREAM_COLLECTIBLE_SIZE,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_prepopulate_layout() {
        let mut world = World::new();
        let mut rng = Pcg32::seed_from_u64(7);
        populate_level(&mut world, SpawnPolicy::Prepopulated, &mut rng);

        assert_eq!(world.obstacles.len(), PREPOPULATED_OBSTACLES);
        assert!(world.collectibles.len() <= PREPOPULATED_OBSTACLES);

        for (i, o) in world.obstacles.iter().enumerate() {
            let base = WIDTH + i as f32 * OBSTACLE_SPACING;
            assert!((o.rect.left() - base).abs() <= POSITION_JITTER as f32);
            assert!((40.0..=70.0).contains(&o.rect.size.x));
            assert!((24.0..=40.0).contains(&o.rect.size.y));
            assert_eq!(o.kind, EntityKind::Obstacle);
        }
        for c in &world.collectibles {
            assert_eq!(c.rect.size.x, COLLECTIBLE_SIZE);
            assert!(c.rect.bottom() < GROUND_Y - PLAYER_H);
        }
    }

    #[test]
    fn test_prepopulate_collectible_ratio() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut total = 0;
        for _ in 0..100 {
            let mut world = World::new();
            populate_level(&mut world, SpawnPolicy::Prepopulated, &mut rng);
            total += world.collectibles.len();
        }
        // 1000 rolls at 0.7
        assert!((600..=800).contains(&total), "got {total}");
    }

    #[test]
    fn test_policies_are_exclusive() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut world = World::new();
        populate_level(&mut world, SpawnPolicy::PerFrame, &mut rng);
        for _ in 0..1000 {
            spawn_frame(&mut world, SpawnPolicy::Prepopulated, &mut rng);
        }
        assert!(world.obstacles.is_empty() && world.collectibles.is_empty());
    }

    #[test]
    fn test_stream_spawns_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut world = World::new();
        for _ in 0..3000 {
            spawn_frame(&mut world, SpawnPolicy::PerFrame, &mut rng);
        }
        // ~60 obstacles and ~45 collectibles expected
        assert!((20..=120).contains(&world.obstacles.len()));
        assert!((10..=100).contains(&world.collectibles.len()));
        assert!(world.obstacles.iter().all(|o| o.rect.left() == WIDTH));
        assert!(world.obstacles.iter().all(|o| o.rect.bottom() == GROUND_Y));
        assert!(world.collectibles.iter().all(|c| c.rect.left() == WIDTH));
    }
}
