//! Text overlay layout
//!
//! Text is not rasterized by the GPU pipeline. Each frame the active
//! screen is turned into a list of `TextItem`s positioned in logical
//! canvas coordinates; the browser entry point mirrors them into a DOM
//! overlay on top of the canvas.

use glam::Vec2;

use crate::consts::*;
use crate::content::DecisionPoint;
use crate::layout;
use crate::platform::Host;
use crate::renderer::colors::{self, Rgb};
use crate::session::Session;
use crate::sim::{Rect, Screen};
use crate::tuning::Variant;

/// Font sizes in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Big,
    Huge,
}

impl TextSize {
    pub fn px(&self) -> f32 {
        match self {
            TextSize::Small => 22.0,
            TextSize::Big => 36.0,
            TextSize::Huge => 56.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    /// Top-left, or top-center when `centered`
    pub pos: Vec2,
    pub size: TextSize,
    pub color: Rgb,
    pub centered: bool,
    /// Wrap width, for text that lives inside a card
    pub max_width: Option<f32>,
}

impl TextItem {
    fn at(text: impl Into<String>, x: f32, y: f32, size: TextSize, color: Rgb) -> Self {
        Self {
            text: text.into(),
            pos: Vec2::new(x, y),
            size,
            color,
            centered: false,
            max_width: None,
        }
    }

    fn centered(text: impl Into<String>, x: f32, y: f32, size: TextSize, color: Rgb) -> Self {
        Self {
            centered: true,
            ..Self::at(text, x, y, size, color)
        }
    }

    fn wrapped(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Lay out every piece of text for the active screen
pub fn text_items<H: Host>(session: &Session<H>) -> Vec<TextItem> {
    match session.screen {
        Screen::Opening => opening(session.tuning.variant),
        Screen::Playing => hud(session),
        Screen::Decision(point) => decision(point),
        Screen::Final if session.tuning.is_timed() => timed_summary(session),
        Screen::Final => trail_summary(session),
    }
}

fn opening(variant: Variant) -> Vec<TextItem> {
    let lines: &[&str] = match variant {
        Variant::Trilha => &[
            "Clique para começar.",
            "Durante o jogo: clique para pular.",
            "Nas escolhas: clique no cartão desejado.",
        ],
        Variant::Feira => &[
            "Clique para começar.",
            "Clique para pular os obstáculos.",
            "Cada ideia coletada vale 1 ponto.",
            "Você tem 30 segundos.",
        ],
        Variant::Sprint => &[
            "Clique para começar.",
            "Clique para pular os bugs.",
            "Colete commits por 30 segundos.",
        ],
    };

    let mut items = vec![TextItem::centered(
        variant.title(),
        WIDTH / 2.0,
        140.0,
        TextSize::Huge,
        colors::ACCENT2,
    )];
    let line_height = TextSize::Big.px() + 8.0;
    for (i, line) in lines.iter().enumerate() {
        items.push(TextItem::centered(
            *line,
            WIDTH / 2.0,
            240.0 + i as f32 * line_height,
            TextSize::Big,
            colors::FOREGROUND,
        ));
    }
    items
}

fn score_label(variant: Variant) -> &'static str {
    match variant {
        Variant::Feira => "Pontos",
        Variant::Trilha | Variant::Sprint => "Commits",
    }
}

fn hud<H: Host>(session: &Session<H>) -> Vec<TextItem> {
    let mut items = vec![TextItem::at(
        format!("{}: {}", score_label(session.tuning.variant), session.run.score),
        20.0,
        16.0,
        TextSize::Small,
        colors::COLLECTIBLE,
    )];
    if let Some(left) = session.time_left() {
        items.push(TextItem::at(
            format!("Tempo: {}s", left.ceil() as u32),
            WIDTH - 160.0,
            16.0,
            TextSize::Small,
            colors::FOREGROUND,
        ));
    }
    if let Some(tip) = session.tip {
        items.push(TextItem::centered(
            tip.message,
            WIDTH / 2.0,
            80.0,
            TextSize::Big,
            colors::ACCENT2,
        ));
    }
    items
}

fn card_text(items: &mut Vec<TextItem>, card: &Rect, point: DecisionPoint, a: bool) {
    let (opt_a, opt_b) = point.options();
    let option = if a { opt_a } else { opt_b };
    let pad = 14.0;
    let x = card.left() + pad;
    let width = card.size.x - pad * 2.0;
    items.push(TextItem::at(option.title, x, card.top() + pad, TextSize::Big, colors::BLACK).wrapped(width));
    items.push(TextItem::at(option.presenter, x, card.top() + 200.0, TextSize::Small, colors::INK).wrapped(width));
    items.push(
        TextItem::at(option.schedule, x, card.top() + 250.0, TextSize::Small, colors::INK_LIGHT).wrapped(width),
    );
}

fn decision(point: DecisionPoint) -> Vec<TextItem> {
    let mut items = vec![TextItem::centered(
        point.heading(),
        WIDTH / 2.0,
        50.0,
        TextSize::Big,
        colors::ACCENT2,
    )];
    card_text(&mut items, &layout::CARD_A, point, true);
    card_text(&mut items, &layout::CARD_B, point, false);
    items.push(TextItem::centered(
        "Clique no cartão para escolher (auto B em 5s)",
        WIDTH / 2.0,
        485.0,
        TextSize::Small,
        colors::FOREGROUND,
    ));
    items
}

fn button_label(items: &mut Vec<TextItem>, button: &Rect, label: &str) {
    let c = button.center();
    items.push(TextItem::centered(label, c.x, c.y - 20.0, TextSize::Big, colors::BLACK));
}

fn trail_summary<H: Host>(session: &Session<H>) -> Vec<TextItem> {
    let mut items = vec![TextItem::centered(
        "Trilha Compilada",
        WIDTH / 2.0,
        40.0,
        TextSize::Huge,
        colors::ACCENT2,
    )];

    let points = [DecisionPoint::First, DecisionPoint::Second];
    for (row, point) in layout::SUMMARY_ROWS.iter().zip(points) {
        let Some(option) = session.run.option(point) else {
            continue;
        };
        let x = row.left() + 16.0;
        items.push(
            TextItem::at(
                format!("{}: {}", point.day_label(), option.title),
                x,
                row.top() + 12.0,
                TextSize::Big,
                colors::FOREGROUND,
            )
            .wrapped(row.size.x - 32.0),
        );
        items.push(TextItem::at(
            format!("{} | {}", option.presenter, option.schedule),
            x,
            row.top() + 56.0,
            TextSize::Small,
            colors::SUBTLE,
        ));
    }

    button_label(&mut items, &layout::BTN_DOWNLOAD, "Baixar CSV");
    button_label(&mut items, &layout::BTN_RESTART, "Reiniciar");
    items.push(TextItem::at(
        format!("Commits coletados: {}", session.run.score),
        WIDTH - 260.0,
        16.0,
        TextSize::Small,
        colors::COLLECTIBLE,
    ));
    items
}

fn timed_summary<H: Host>(session: &Session<H>) -> Vec<TextItem> {
    let panel = layout::SUMMARY_PANEL;
    let cx = panel.center().x;
    let variant = session.tuning.variant;

    let title = match variant {
        Variant::Feira => "Fim da Feira!",
        Variant::Trilha | Variant::Sprint => "Sprint encerrada!",
    };
    let mut items = vec![
        TextItem::centered(title, cx, 40.0, TextSize::Huge, colors::ACCENT2),
        TextItem::centered(
            format!("{}: {}", score_label(variant), session.run.score),
            cx,
            panel.top() + 40.0,
            TextSize::Big,
            colors::COLLECTIBLE,
        ),
    ];
    if let Some(profile) = session.profile_label() {
        items.push(TextItem::centered(
            format!("Perfil: {profile}"),
            cx,
            panel.top() + 110.0,
            TextSize::Big,
            colors::FOREGROUND,
        ));
    }
    items.push(TextItem::centered(
        "Clique para jogar novamente",
        cx,
        panel.bottom() + 40.0,
        TextSize::Small,
        colors::MUTED,
    ));
    items
}
