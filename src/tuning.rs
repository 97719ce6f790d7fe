//! Per-variant game rules
//!
//! The three mini-games share one engine; each variant resolves to a
//! `Tuning` that switches spawning, obstacle handling, session length and
//! the optional features on or off.

use serde::{Deserialize, Serialize};

use crate::consts::SESSION_SECONDS;

/// Which mini-game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// IF/ELSE "Trilha da Borborema": decisions, CSV export, persistence
    #[default]
    Trilha,
    /// Entrepreneurship fair: timed, penalties, tips, profile label
    Feira,
    /// IF/ELSE quick run: timed, penalties
    Sprint,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Trilha, Variant::Feira, Variant::Sprint];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Trilha => "trilha",
            Variant::Feira => "feira",
            Variant::Sprint => "sprint",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trilha" | "a" => Some(Variant::Trilha),
            "feira" | "b" => Some(Variant::Feira),
            "sprint" | "c" => Some(Variant::Sprint),
            _ => None,
        }
    }

    /// Pick the variant out of a URL query string such as `?variant=feira`
    pub fn from_query(query: &str) -> Option<Self> {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "variant")
            .and_then(|(_, value)| Self::from_str(value))
    }

    /// Window / page title
    pub fn title(&self) -> &'static str {
        match self {
            Variant::Trilha => "IF/ELSE — Trilha da Borborema",
            Variant::Feira => "Feira do Empreendedor — Corrida",
            Variant::Sprint => "IF/ELSE — Sprint de Commits",
        }
    }
}

/// How entities enter the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// Fixed set laid out at level reset
    Prepopulated,
    /// Rolled every frame at the right edge
    PerFrame,
}

/// What touching an obstacle does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleEffect {
    /// Player hops over it; obstacle stays
    AutoJump,
    /// Score drops by one (never below zero); obstacle is destroyed
    Penalty,
}

/// Resolved rules for one variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub variant: Variant,
    pub spawn: SpawnPolicy,
    pub obstacle_effect: ObstacleEffect,
    /// Playing ends on its own after this many seconds
    pub session_limit: Option<f32>,
    /// Decision points interrupt the run at distance thresholds
    pub decisions: bool,
    /// Collectibles show a transient tip
    pub tips: bool,
    /// Final screen writes the run snapshot and offers CSV export
    pub persist_summary: bool,
    /// Final screen shows a profile label derived from score
    pub profile: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl Tuning {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Trilha => Self {
                variant,
                spawn: SpawnPolicy::Prepopulated,
                obstacle_effect: ObstacleEffect::AutoJump,
                session_limit: None,
                decisions: true,
                tips: false,
                persist_summary: true,
                profile: false,
            },
            Variant::Feira => Self {
                variant,
                spawn: SpawnPolicy::PerFrame,
                obstacle_effect: ObstacleEffect::Penalty,
                session_limit: Some(SESSION_SECONDS),
                decisions: false,
                tips: true,
                persist_summary: false,
                profile: true,
            },
            Variant::Sprint => Self {
                variant,
                spawn: SpawnPolicy::PerFrame,
                obstacle_effect: ObstacleEffect::Penalty,
                session_limit: Some(SESSION_SECONDS),
                decisions: false,
                tips: false,
                persist_summary: false,
                profile: false,
            },
        }
    }

    /// Timed variants return to Opening on any click from Final
    pub fn is_timed(&self) -> bool {
        self.session_limit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names_roundtrip() {
        for v in Variant::ALL {
            assert_eq!(Variant::from_str(v.as_str()), Some(v));
        }
        assert_eq!(Variant::from_str(" FEIRA "), Some(Variant::Feira));
        assert_eq!(Variant::from_str("nope"), None);
    }

    #[test]
    fn test_variant_from_query() {
        assert_eq!(Variant::from_query("?variant=sprint"), Some(Variant::Sprint));
        assert_eq!(Variant::from_query("?a=1&variant=feira&b=2"), Some(Variant::Feira));
        assert_eq!(Variant::from_query("?variant=unknown"), None);
        assert_eq!(Variant::from_query(""), None);
    }

    #[test]
    fn test_decision_variant_is_untimed() {
        let t = Tuning::for_variant(Variant::Trilha);
        assert!(t.decisions);
        assert!(!t.is_timed());
        assert_eq!(t.spawn, SpawnPolicy::Prepopulated);
        assert_eq!(t.obstacle_effect, ObstacleEffect::AutoJump);
    }

    #[test]
    fn test_timed_variants_penalize() {
        for v in [Variant::Feira, Variant::Sprint] {
            let t = Tuning::for_variant(v);
            assert!(!t.decisions);
            assert_eq!(t.session_limit, Some(SESSION_SECONDS));
            assert_eq!(t.obstacle_effect, ObstacleEffect::Penalty);
            assert_eq!(t.spawn, SpawnPolicy::PerFrame);
        }
        assert!(Tuning::for_variant(Variant::Feira).tips);
        assert!(!Tuning::for_variant(Variant::Sprint).tips);
    }
}
