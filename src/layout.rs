//! Fixed screen geometry shared by input handling, drawing and text layout

use crate::consts::*;
use crate::sim::Rect;

/// Decision cards: left is option A, right is option B
pub const CARD_A: Rect = Rect::new(80.0, 120.0, WIDTH / 2.0 - 120.0, 320.0);
pub const CARD_B: Rect = Rect::new(WIDTH / 2.0 + 40.0, 120.0, WIDTH / 2.0 - 120.0, 320.0);

/// Countdown bar track under the cards
pub const COUNTDOWN_TRACK: Rect = Rect::new(80.0, 460.0, WIDTH - 160.0, 10.0);
const COUNTDOWN_MIN_WIDTH: f32 = 10.0;

/// Final screen buttons
pub const BTN_DOWNLOAD: Rect = Rect::new(WIDTH / 2.0 - 180.0, HEIGHT - 110.0, 160.0, 50.0);
pub const BTN_RESTART: Rect = Rect::new(WIDTH / 2.0 + 20.0, HEIGHT - 110.0, 160.0, 50.0);

/// Final screen: one row per decision
pub const SUMMARY_ROWS: [Rect; 2] = [
    Rect::new(80.0, 120.0, WIDTH - 160.0, 96.0),
    Rect::new(80.0, 232.0, WIDTH - 160.0, 96.0),
];

/// Timed variants: summary panel
pub const SUMMARY_PANEL: Rect = Rect::new(180.0, 130.0, WIDTH - 360.0, 260.0);

/// Filled part of the countdown bar for `remaining` seconds
pub fn countdown_fill(remaining: f32) -> Rect {
    let ratio = (remaining / DECISION_SECONDS).clamp(0.0, 1.0);
    let w = (ratio * COUNTDOWN_TRACK.size.x).floor().max(COUNTDOWN_MIN_WIDTH);
    Rect {
        pos: COUNTDOWN_TRACK.pos,
        size: glam::Vec2::new(w, COUNTDOWN_TRACK.size.y),
    }
}
