//! Static reference data: decision options, tips and profile labels

use serde::Serialize;

/// One card of a decision point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub id: &'static str,
    pub title: &'static str,
    pub presenter: &'static str,
    pub schedule: &'static str,
}

/// Which of the two decision points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DecisionPoint {
    First,
    Second,
}

/// Left (A) or right (B) card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    /// Taken when the countdown runs out
    pub const DEFAULT: Choice = Choice::B;
}

pub const OPT1_A: ChoiceOption = ChoiceOption {
    id: "21_inovacao",
    title: "Liderando com inovação",
    presenter: "Dafna Blaschkauer",
    schedule: "Palco Mandacaru | 21/08 — 18h30",
};

pub const OPT1_B: ChoiceOption = ChoiceOption {
    id: "21_carreira",
    title: "Carreira, Empreendedorismo e Economia Criativa",
    presenter: "Carlinhos Brown & Marc Tawill",
    schedule: "Palco Principal | 21/08 — 20h",
};

pub const OPT2_A: ChoiceOption = ChoiceOption {
    id: "22_ia",
    title: "IA aplicada à rotina dos pequenos negócios",
    presenter: "Andrea Formiga",
    schedule: "Palco Angico | 22/08 — 15h30",
};

pub const OPT2_B: ChoiceOption = ChoiceOption {
    id: "22_criativo",
    title: "O futuro é criativo",
    presenter: "Caio Viana",
    schedule: "Palco Broto de Catingueiras | 22/08 — 16h45",
};

impl DecisionPoint {
    pub fn options(&self) -> (&'static ChoiceOption, &'static ChoiceOption) {
        match self {
            DecisionPoint::First => (&OPT1_A, &OPT1_B),
            DecisionPoint::Second => (&OPT2_A, &OPT2_B),
        }
    }

    pub fn option(&self, choice: Choice) -> &'static ChoiceOption {
        let (a, b) = self.options();
        match choice {
            Choice::A => a,
            Choice::B => b,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            DecisionPoint::First => "Dia 21 — Selecione sua ênfase",
            DecisionPoint::Second => "Dia 22 — Selecione sua ênfase",
        }
    }

    /// Label used on the summary screen
    pub fn day_label(&self) -> &'static str {
        match self {
            DecisionPoint::First => "Dia 21",
            DecisionPoint::Second => "Dia 22",
        }
    }
}

/// Tips shown when a collectible is picked up
pub const TIPS: [&str; 8] = [
    "Valide a ideia antes de construir.",
    "Conheça seu cliente pelo nome.",
    "Fluxo de caixa é oxigênio.",
    "Parcerias aceleram o crescimento.",
    "Feito é melhor que perfeito.",
    "Ouça o feedback, ajuste a rota.",
    "Networking abre portas.",
    "Meça o que importa.",
];

/// Profile label for a final score
pub fn profile_label(score: u32) -> &'static str {
    match score {
        0..=5 => "Iniciante Visionário",
        6..=10 => "Empreendedor em Ascensão",
        _ => "Líder Transformador",
    }
}
