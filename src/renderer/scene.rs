//! Scene building: session state in, triangles out
//!
//! Reads the session and never writes to it. Text is laid out separately
//! by `crate::ui`.

use super::rain::CodeRain;
use super::shapes::{outlined_rect, rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::layout;
use crate::platform::Host;
use crate::session::Session;
use crate::sim::{Rect, Screen, World};

const GROUND_STRIPE_PERIOD: i32 = 80;

/// Build every triangle for the current frame
pub fn build<H: Host>(session: &Session<H>, rain: &CodeRain) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(2048);

    match session.screen {
        Screen::Opening => rain.draw(&mut out),
        Screen::Playing => {
            rain.draw(&mut out);
            world(&mut out, &session.world);
        }
        Screen::Decision(_) => decision(&mut out, session.countdown),
        Screen::Final => {
            if session.tuning.is_timed() {
                outlined_rect(&mut out, &layout::SUMMARY_PANEL, colors::PANEL, colors::BLACK, 2.0);
            } else {
                trail_summary(&mut out);
            }
        }
    }

    out
}

fn world(out: &mut Vec<Vertex>, world: &World) {
    // Ground band with stripes sliding by scrolled distance
    rect(out, &Rect::new(0.0, GROUND_Y, WIDTH, HEIGHT - GROUND_Y), colors::GROUND);
    let offset = world.scroll_x as i32 % GROUND_STRIPE_PERIOD;
    for i in (0..WIDTH as i32).step_by(GROUND_STRIPE_PERIOD as usize) {
        let x = (i - offset) as f32;
        rect(out, &Rect::new(x, GROUND_Y, 40.0, 6.0), colors::GROUND_STRIPE);
    }

    for obstacle in &world.obstacles {
        rect(out, &obstacle.rect, colors::OBSTACLE);
    }
    for collectible in &world.collectibles {
        rect(out, &collectible.rect, colors::COLLECTIBLE);
    }

    let p = world.player.rect();
    rect(out, &p, colors::ACCENT);
    rect(out, &Rect::new(p.left() + 8.0, p.top() + 12.0, 6.0, 6.0), colors::BLACK);
    rect(out, &Rect::new(p.left() + 18.0, p.top() + 12.0, 6.0, 6.0), colors::BLACK);
}

fn decision(out: &mut Vec<Vertex>, countdown: f32) {
    outlined_rect(out, &layout::CARD_A, colors::CARD_A, colors::BLACK, 2.0);
    outlined_rect(out, &layout::CARD_B, colors::CARD_B, colors::BLACK, 2.0);
    rect(out, &layout::COUNTDOWN_TRACK, colors::TRACK);
    rect(out, &layout::countdown_fill(countdown.max(0.0)), colors::ACCENT);
}

fn trail_summary(out: &mut Vec<Vertex>) {
    for row in &layout::SUMMARY_ROWS {
        outlined_rect(out, row, colors::PANEL, colors::BLACK, 2.0);
    }
    outlined_rect(out, &layout::BTN_DOWNLOAD, colors::BUTTON_DOWNLOAD, colors::BLACK, 2.0);
    outlined_rect(out, &layout::BTN_RESTART, colors::BUTTON_RESTART, colors::BLACK, 2.0);
}
