//! Falling "code rain" background
//!
//! Purely visual; has its own RNG so it never disturbs the gameplay stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{HEIGHT, WIDTH};

const COLUMNS: usize = 110;
const STREAK_LENGTH: f32 = 40.0;

pub struct CodeRain {
    x: Vec<f32>,
    y: Vec<f32>,
    speed: Vec<f32>,
    rng: Pcg32,
}

impl CodeRain {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let speed = (0..COLUMNS).map(|_| rng.random_range(40.0..140.0)).collect();
        let y = (0..COLUMNS).map(|_| rng.random_range(-HEIGHT..0.0)).collect();
        let x = (0..COLUMNS)
            .map(|i| i as f32 * (WIDTH / COLUMNS as f32))
            .collect();
        Self { x, y, speed, rng }
    }

    pub fn update(&mut self, dt: f32) {
        for i in 0..COLUMNS {
            self.y[i] += self.speed[i] * dt;
            if self.y[i] > HEIGHT + STREAK_LENGTH {
                self.y[i] = self.rng.random_range(-HEIGHT * 0.5..0.0);
                self.speed[i] = self.rng.random_range(60.0..160.0);
            }
        }
    }

    pub fn draw(&self, out: &mut Vec<Vertex>) {
        for i in 0..COLUMNS {
            let color = if i % 3 == 0 {
                colors::RAIN_BRIGHT
            } else {
                colors::RAIN_DIM
            };
            let head = Vec2::new(self.x[i], self.y[i]);
            shapes::line(out, head, head - Vec2::new(0.0, STREAK_LENGTH), 2.0, color);
        }
    }
}
