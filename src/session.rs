//! One play session
//!
//! `Session` owns every piece of mutable state (screen, world, run, clock,
//! tip, countdown, RNG) plus the injected `Host`. Each frame dispatches to
//! exactly one screen handler; screen changes go through
//! `sim::transition` and their side effects are applied in `fire`.

use chrono::{DateTime, Local};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::content::{self, Choice, DecisionPoint};
use crate::export::{RunRow, csv_document, snapshot_json};
use crate::layout;
use crate::platform::Host;
use crate::sim::{
    Clock, FrameReport, Resolution, RunState, Screen, Tip, Trigger, World, populate_level, tick,
    transition,
};
use crate::tuning::Tuning;

pub struct Session<H: Host> {
    pub tuning: Tuning,
    pub screen: Screen,
    pub world: World,
    pub run: RunState,
    pub clock: Clock,
    pub tip: Option<Tip>,
    /// Seconds left on the active decision countdown
    pub countdown: f32,
    /// Wall-clock time the run reached the final screen
    pub finished_at: Option<DateTime<Local>>,
    rng: Pcg32,
    host: H,
}

impl<H: Host> Session<H> {
    pub fn new(tuning: Tuning, seed: u64, host: H) -> Self {
        let mut session = Self {
            tuning,
            screen: Screen::Opening,
            world: World::new(),
            run: RunState::default(),
            clock: Clock::default(),
            tip: None,
            countdown: DECISION_SECONDS,
            finished_at: None,
            rng: Pcg32::seed_from_u64(seed),
            host,
        };
        session.reset_level();
        log::info!(
            "Session created: variant={} seed={}",
            tuning.variant.as_str(),
            seed
        );
        session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Primary button pressed at `pos` (logical canvas coordinates)
    pub fn handle_click(&mut self, pos: Vec2) {
        match self.screen {
            Screen::Opening => {
                self.fire(Trigger::Start);
            }
            Screen::Playing => {
                self.world.player.jump();
            }
            Screen::Decision(point) => {
                if layout::CARD_A.contains(pos) {
                    self.fire(Trigger::Chosen(point, Choice::A));
                } else if layout::CARD_B.contains(pos) {
                    self.fire(Trigger::Chosen(point, Choice::B));
                }
            }
            Screen::Final => {
                if self.tuning.is_timed() {
                    self.fire(Trigger::Restart);
                } else if layout::BTN_DOWNLOAD.contains(pos) {
                    self.export_csv();
                } else if layout::BTN_RESTART.contains(pos) {
                    self.fire(Trigger::Restart);
                }
            }
        }
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.clock.advance(dt);

        match self.screen {
            Screen::Opening => {}
            Screen::Playing => self.update_playing(dt),
            Screen::Decision(point) => {
                self.countdown -= dt;
                if self.countdown <= 0.0 {
                    self.fire(Trigger::CountdownExpired(point));
                }
            }
            Screen::Final => self.persist_summary(),
        }
    }

    fn update_playing(&mut self, dt: f32) {
        let report = tick(
            &mut self.world,
            &mut self.run,
            &self.tuning,
            &mut self.rng,
            dt,
        );
        if report.hits > 0 {
            log::debug!(
                "Obstacle contact x{} at {:.2}s (score {})",
                report.hits,
                self.clock.total,
                self.run.score
            );
        }
        self.update_tip(&report);

        if let Some(trigger) = self.playing_trigger() {
            self.fire(trigger);
        }
    }

    fn update_tip(&mut self, report: &FrameReport) {
        let now = self.clock.level;
        if self.tuning.tips && report.collected > 0 {
            let message = content::TIPS[self.rng.random_range(0..content::TIPS.len())];
            self.tip = Some(Tip {
                message,
                shown_at: now,
            });
        }
        if self.tip.is_some_and(|tip| tip.is_expired(now)) {
            self.tip = None;
        }
    }

    /// Distance and time thresholds that end the current Playing stretch
    fn playing_trigger(&self) -> Option<Trigger> {
        if self.tuning.decisions {
            let distance = self.clock.distance(SCROLL_SPEED);
            if self.run.first.is_none() && distance > DECISION1_DISTANCE {
                return Some(Trigger::DistanceReached(DecisionPoint::First));
            }
            if self.run.first.is_some()
                && self.run.second.is_none()
                && distance > DECISION2_DISTANCE
            {
                return Some(Trigger::DistanceReached(DecisionPoint::Second));
            }
        }
        if let Some(limit) = self.tuning.session_limit {
            if self.clock.level >= limit {
                return Some(Trigger::TimeUp);
            }
        }
        None
    }

    /// Apply a trigger: transition, then the trigger's and the new screen's
    /// side effects. Returns whether the screen changed.
    fn fire(&mut self, trigger: Trigger) -> bool {
        let from = self.screen;
        let to = transition(from, trigger);
        if to == from {
            return false;
        }

        match trigger {
            Trigger::Start => self.run = RunState::default(),
            Trigger::Chosen(point, choice) => {
                self.run.commit(point, choice, Resolution::Clicked);
            }
            Trigger::CountdownExpired(point) => {
                self.run.commit(point, Choice::DEFAULT, Resolution::TimedOut);
            }
            Trigger::Restart => {
                self.run.clear_choices();
                self.finished_at = None;
            }
            Trigger::DistanceReached(_) | Trigger::TimeUp => {}
        }

        self.screen = to;
        match to {
            Screen::Playing => self.reset_level(),
            Screen::Decision(_) => self.countdown = DECISION_SECONDS,
            Screen::Final => self.finished_at = Some(self.host.now()),
            Screen::Opening => {}
        }

        log::info!("Screen {} -> {} ({:?})", from.name(), to.name(), trigger);
        true
    }

    /// Fresh level: empty world, level clock and score back to zero.
    /// Committed choices survive.
    fn reset_level(&mut self) {
        self.world.reset_level();
        self.run.score = 0;
        self.clock.reset_level();
        self.tip = None;
        populate_level(&mut self.world, self.tuning.spawn, &mut self.rng);
        log::debug!("Level reset");
    }

    /// Summary of the finished run, once the final screen has been reached
    pub fn summary_row(&self) -> Option<RunRow> {
        self.finished_at
            .map(|finished_at| RunRow::from_run(&self.run, finished_at))
    }

    /// Overwrite the stored snapshot. Best-effort: failures are logged only.
    fn persist_summary(&mut self) {
        if !self.tuning.persist_summary {
            return;
        }
        let Some(row) = self.summary_row() else {
            return;
        };
        let result = snapshot_json(&row.snapshot())
            .and_then(|json| self.host.store(STORAGE_KEY, &json));
        if let Err(e) = result {
            log::debug!("Snapshot not stored: {e:#}");
        }
    }

    /// Offer the run as a CSV download. Best-effort.
    fn export_csv(&mut self) {
        if !self.tuning.persist_summary {
            return;
        }
        let Some(row) = self.summary_row() else {
            return;
        };
        let csv = csv_document(&[row]);
        if let Err(e) = self.host.download(CSV_FILENAME, "text/csv", &csv) {
            log::warn!("CSV download failed: {e:#}");
        }
    }

    /// Seconds left in a timed session
    pub fn time_left(&self) -> Option<f32> {
        self.tuning
            .session_limit
            .map(|limit| (limit - self.clock.level).max(0.0))
    }

    /// Profile label for variants that show one
    pub fn profile_label(&self) -> Option<&'static str> {
        self.tuning
            .profile
            .then(|| content::profile_label(self.run.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryHost;
    use crate::sim::{EntityKind, Rect};
    use crate::tuning::Variant;
    use chrono::TimeZone;

    const DT: f32 = 1.0 / FPS;

    fn host() -> MemoryHost {
        MemoryHost::new(Local.with_ymd_and_hms(2025, 8, 22, 17, 0, 0).single().unwrap())
    }

    fn session(variant: Variant) -> Session<MemoryHost> {
        Session::new(Tuning::for_variant(variant), 1234, host())
    }

    /// Run frames until the screen changes or `max` frames pass
    fn run_until_change(s: &mut Session<MemoryHost>, max: usize) -> usize {
        let start = s.screen;
        for frame in 0..max {
            s.update(DT);
            if s.screen != start {
                return frame + 1;
            }
        }
        max
    }

    fn place_next_to_player(s: &mut Session<MemoryHost>, kind: EntityKind, size: f32) {
        let p = s.world.player.rect();
        s.world
            .spawn(kind, Rect::new(p.left() + 4.0, p.bottom() - size, size, size));
    }

    #[test]
    fn test_click_starts_with_zero_score() {
        let mut s = session(Variant::Feira);
        s.run.score = 9;
        assert_eq!(s.screen, Screen::Opening);
        s.handle_click(Vec2::new(3.0, 3.0));
        assert_eq!(s.screen, Screen::Playing);
        assert_eq!(s.run.score, 0);
        assert_eq!(s.clock.level, 0.0);
    }

    #[test]
    fn test_click_jumps_while_playing() {
        let mut s = session(Variant::Sprint);
        s.handle_click(Vec2::ZERO);
        s.handle_click(Vec2::ZERO);
        assert!(!s.world.player.grounded);
        assert_eq!(s.world.player.vy, JUMP_VELOCITY);
    }

    #[test]
    fn test_penalty_variant_end_to_end() {
        let mut s = session(Variant::Feira);
        s.handle_click(Vec2::new(480.0, 270.0));

        for _ in 0..3 {
            place_next_to_player(&mut s, EntityKind::Collectible, 20.0);
            s.update(DT);
        }
        assert_eq!(s.run.score, 3);
        assert!(s.tip.is_some());

        place_next_to_player(&mut s, EntityKind::Obstacle, 40.0);
        s.update(DT);
        assert_eq!(s.run.score, 2);

        s.clock.level = SESSION_SECONDS - 0.001;
        s.update(DT);
        assert_eq!(s.screen, Screen::Final);
        assert_eq!(s.run.score, 2);
        assert_eq!(s.profile_label(), Some("Iniciante Visionário"));

        // Timed variants: any click goes back to the opening screen
        s.handle_click(Vec2::new(1.0, 1.0));
        assert_eq!(s.screen, Screen::Opening);
    }

    #[test]
    fn test_timed_session_ends_after_limit() {
        let mut s = session(Variant::Sprint);
        s.handle_click(Vec2::ZERO);
        let frames = run_until_change(&mut s, 60 * 40);
        assert_eq!(s.screen, Screen::Final);
        assert!((frames as f32 * DT - SESSION_SECONDS).abs() < 0.1);
        assert_eq!(s.time_left(), Some(0.0));
        // Timed variants never persist
        s.update(DT);
        assert_eq!(s.host().store_calls, 0);
    }

    #[test]
    fn test_tip_expires() {
        let mut s = session(Variant::Feira);
        s.handle_click(Vec2::ZERO);
        place_next_to_player(&mut s, EntityKind::Collectible, 20.0);
        s.update(DT);
        assert!(s.tip.is_some());

        // Keep the player clear of anything that spawns meanwhile
        s.world.obstacles.clear();
        for _ in 0..(2.0 * FPS) as usize + 2 {
            s.world.collectibles.clear();
            s.update(DT);
        }
        assert!(s.tip.is_none());
    }

    #[test]
    fn test_sprint_has_no_tips_or_profile() {
        let mut s = session(Variant::Sprint);
        s.handle_click(Vec2::ZERO);
        place_next_to_player(&mut s, EntityKind::Collectible, 20.0);
        s.update(DT);
        assert_eq!(s.run.score, 1);
        assert!(s.tip.is_none());
        assert_eq!(s.profile_label(), None);
    }

    #[test]
    fn test_decision_variant_end_to_end() {
        let mut s = session(Variant::Trilha);
        s.handle_click(Vec2::ZERO);
        assert_eq!(s.world.obstacles.len(), PREPOPULATED_OBSTACLES);

        // 900px at 240px/s
        run_until_change(&mut s, 60 * 10);
        assert_eq!(s.screen, Screen::Decision(DecisionPoint::First));

        // No click for 5s: the second card is forced
        let frames = run_until_change(&mut s, 60 * 10);
        assert!(frames >= 300 && frames <= 302, "took {frames} frames");
        assert_eq!(s.screen, Screen::Playing);
        let d1 = s.run.first.unwrap();
        assert_eq!(d1.choice, Choice::B);
        assert_eq!(d1.resolution, Resolution::TimedOut);
        // Fresh level
        assert_eq!(s.clock.level, 0.0);
        assert_eq!(s.world.player, Default::default());

        run_until_change(&mut s, 60 * 10);
        assert_eq!(s.screen, Screen::Decision(DecisionPoint::Second));

        s.handle_click(layout::CARD_A.center());
        assert_eq!(s.screen, Screen::Final);
        let d2 = s.run.second.unwrap();
        assert_eq!(d2.choice, Choice::A);
        assert_eq!(d2.resolution, Resolution::Clicked);
        // Decision one is untouched
        assert_eq!(s.run.first, Some(d1));

        s.update(DT);
        let stored = s.host().get(STORAGE_KEY).unwrap();
        let json: serde_json::Value = serde_json::from_str(stored).unwrap();
        assert_eq!(json["d1"], "21_carreira");
        assert_eq!(json["d2"], "22_ia");
        assert_eq!(json["commits"], s.run.score);
    }

    #[test]
    fn test_click_cancels_countdown() {
        let mut s = session(Variant::Trilha);
        s.handle_click(Vec2::ZERO);
        s.fire(Trigger::DistanceReached(DecisionPoint::First));
        s.update(1.0);
        s.handle_click(layout::CARD_A.center());
        assert_eq!(s.screen, Screen::Playing);

        // Time that would have expired the countdown changes nothing
        for _ in 0..10 {
            s.update(0.5);
        }
        let d1 = s.run.first.unwrap();
        assert_eq!(d1.choice, Choice::A);
        assert_eq!(d1.resolution, Resolution::Clicked);
    }

    #[test]
    fn test_level_reset_after_decision_zeroes_score() {
        let mut s = session(Variant::Trilha);
        s.handle_click(Vec2::ZERO);
        place_next_to_player(&mut s, EntityKind::Collectible, 16.0);
        s.update(DT);
        assert_eq!(s.run.score, 1);

        s.fire(Trigger::DistanceReached(DecisionPoint::First));
        assert_eq!(s.run.score, 1);
        s.handle_click(layout::CARD_A.center());
        assert_eq!(s.screen, Screen::Playing);
        assert_eq!(s.run.score, 0);
        assert_eq!(s.run.first.unwrap().choice, Choice::A);
    }

    #[test]
    fn test_total_clock_spans_level_resets() {
        let mut s = session(Variant::Trilha);
        s.handle_click(Vec2::ZERO);
        s.update(1.0);
        s.fire(Trigger::DistanceReached(DecisionPoint::First));
        s.update(DECISION_SECONDS + 0.5);
        assert_eq!(s.screen, Screen::Playing);
        assert_eq!(s.clock.level, 0.0);
        assert!((s.clock.total - (1.0 + DECISION_SECONDS as f64 + 0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_click_outside_cards_ignored() {
        let mut s = session(Variant::Trilha);
        s.handle_click(Vec2::ZERO);
        s.fire(Trigger::DistanceReached(DecisionPoint::First));
        s.handle_click(Vec2::new(470.0, 300.0));
        s.handle_click(Vec2::new(10.0, 10.0));
        assert_eq!(s.screen, Screen::Decision(DecisionPoint::First));
        assert!(s.run.first.is_none());
    }

    #[test]
    fn test_countdown_forces_exactly_once() {
        let mut s = session(Variant::Trilha);
        s.handle_click(Vec2::ZERO);
        s.fire(Trigger::DistanceReached(DecisionPoint::First));
        s.update(DECISION_SECONDS + 1.0);
        assert_eq!(s.screen, Screen::Playing);
        assert_eq!(s.run.first.unwrap().resolution, Resolution::TimedOut);
        // Only the second threshold can open a decision now
        s.update(DT);
        assert_eq!(s.screen, Screen::Playing);
    }

    fn finished_trilha() -> Session<MemoryHost> {
        let mut s = session(Variant::Trilha);
        s.handle_click(Vec2::ZERO);
        s.fire(Trigger::DistanceReached(DecisionPoint::First));
        s.handle_click(layout::CARD_B.center());
        s.fire(Trigger::DistanceReached(DecisionPoint::Second));
        s.handle_click(layout::CARD_B.center());
        assert_eq!(s.screen, Screen::Final);
        s
    }

    #[test]
    fn test_final_persists_every_frame_idempotently() {
        let mut s = finished_trilha();
        s.update(DT);
        let first = s.host().get(STORAGE_KEY).unwrap().to_string();
        s.update(DT);
        s.update(DT);
        assert_eq!(s.host().store_calls, 3);
        assert_eq!(s.host().get(STORAGE_KEY).unwrap(), first);
    }

    #[test]
    fn test_download_button_exports_one_row() {
        let mut s = finished_trilha();
        s.run.score = 4;
        s.handle_click(layout::BTN_DOWNLOAD.center());
        assert_eq!(s.screen, Screen::Final);
        let (name, csv) = &s.host().downloads[0];
        assert_eq!(name, CSV_FILENAME);
        assert_eq!(
            csv,
            "timestamp,d1,d2,commits\n2025-08-22 17:00:00,21_carreira,22_criativo,4\n"
        );
    }

    #[test]
    fn test_restart_clears_choices() {
        let mut s = finished_trilha();
        s.handle_click(Vec2::new(5.0, 5.0));
        assert_eq!(s.screen, Screen::Final);
        s.handle_click(layout::BTN_RESTART.center());
        assert_eq!(s.screen, Screen::Opening);
        assert!(s.run.first.is_none() && s.run.second.is_none());
        assert!(s.finished_at.is_none());
        assert!(s.summary_row().is_none());
    }

    #[test]
    fn test_unavailable_host_is_silent() {
        let mut s = finished_trilha();
        s.host_mut().unavailable = true;
        s.update(DT);
        s.handle_click(layout::BTN_DOWNLOAD.center());
        assert_eq!(s.host().store_calls, 1);
        assert!(s.host().downloads.is_empty());
        assert_eq!(s.screen, Screen::Final);
    }
}
