//! Top-level screens and the transitions between them

use serde::Serialize;

use crate::content::{Choice, DecisionPoint};

/// Exactly one screen is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    /// Title card, waiting for a click
    Opening,
    /// Side-scrolling run
    Playing,
    /// Two cards and a countdown
    Decision(DecisionPoint),
    /// Run summary
    Final,
}

/// Semantic events that may move the session to another screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Click on the opening screen
    Start,
    /// Scrolled distance crossed a decision threshold
    DistanceReached(DecisionPoint),
    /// Card clicked
    Chosen(DecisionPoint, Choice),
    /// Countdown hit zero
    CountdownExpired(DecisionPoint),
    /// Timed session ran out
    TimeUp,
    /// Restart from the summary
    Restart,
}

/// Pure transition function. Triggers that make no sense for the current
/// screen leave it unchanged.
pub fn transition(screen: Screen, trigger: Trigger) -> Screen {
    use DecisionPoint::*;

    match (screen, trigger) {
        (Screen::Opening, Trigger::Start) => Screen::Playing,
        (Screen::Playing, Trigger::DistanceReached(point)) => Screen::Decision(point),
        (Screen::Playing, Trigger::TimeUp) => Screen::Final,
        (Screen::Decision(First), Trigger::Chosen(First, _) | Trigger::CountdownExpired(First)) => {
            Screen::Playing
        }
        (Screen::Decision(Second), Trigger::Chosen(Second, _) | Trigger::CountdownExpired(Second)) => {
            Screen::Final
        }
        (Screen::Final, Trigger::Restart) => Screen::Opening,
        (screen, _) => screen,
    }
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Opening => "opening",
            Screen::Playing => "playing",
            Screen::Decision(DecisionPoint::First) => "decision-1",
            Screen::Decision(DecisionPoint::Second) => "decision-2",
            Screen::Final => "final",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_decision_path() {
        let mut s = Screen::Opening;
        s = transition(s, Trigger::Start);
        assert_eq!(s, Screen::Playing);
        s = transition(s, Trigger::DistanceReached(DecisionPoint::First));
        assert_eq!(s, Screen::Decision(DecisionPoint::First));
        s = transition(s, Trigger::CountdownExpired(DecisionPoint::First));
        assert_eq!(s, Screen::Playing);
        s = transition(s, Trigger::DistanceReached(DecisionPoint::Second));
        assert_eq!(s, Screen::Decision(DecisionPoint::Second));
        s = transition(s, Trigger::Chosen(DecisionPoint::Second, Choice::A));
        assert_eq!(s, Screen::Final);
        s = transition(s, Trigger::Restart);
        assert_eq!(s, Screen::Opening);
    }

    #[test]
    fn test_timed_path() {
        let s = transition(Screen::Playing, Trigger::TimeUp);
        assert_eq!(s, Screen::Final);
    }

    #[test]
    fn test_irrelevant_triggers_are_noops() {
        assert_eq!(transition(Screen::Opening, Trigger::TimeUp), Screen::Opening);
        assert_eq!(transition(Screen::Playing, Trigger::Restart), Screen::Playing);
        assert_eq!(transition(Screen::Final, Trigger::Start), Screen::Final);
        // A choice for the other decision point does nothing
        let d1 = Screen::Decision(DecisionPoint::First);
        assert_eq!(transition(d1, Trigger::Chosen(DecisionPoint::Second, Choice::A)), d1);
        assert_eq!(transition(d1, Trigger::TimeUp), d1);
    }
}
