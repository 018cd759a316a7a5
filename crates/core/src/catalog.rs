//! Fixed catalogs offered by the forms: measurement units, colour palette,
//! icon keys. Served as-is by `GET /catalog` and used to validate input.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Measurement unit of a quantitative habit or goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "times")]
    Times,
    #[serde(rename = "min")]
    Minutes,
    #[serde(rename = "hours")]
    Hours,
    #[serde(rename = "pages")]
    Pages,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "steps")]
    Steps,
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "L")]
    Liters,
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "pomodoros")]
    Pomodoros,
    #[serde(rename = "money")]
    Money,
}

/// Catalog entry describing a unit.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnitInfo {
    pub value: Unit,
    pub label: &'static str,
    pub category: &'static str,
}

pub const UNITS: &[UnitInfo] = &[
    UnitInfo { value: Unit::Times, label: "Vezes", category: "Quantidade" },
    UnitInfo { value: Unit::Minutes, label: "Minutos", category: "Tempo" },
    UnitInfo { value: Unit::Hours, label: "Horas", category: "Tempo" },
    UnitInfo { value: Unit::Pages, label: "Páginas", category: "Leitura" },
    UnitInfo { value: Unit::Kilometers, label: "Quilômetros", category: "Distância" },
    UnitInfo { value: Unit::Meters, label: "Metros", category: "Distância" },
    UnitInfo { value: Unit::Steps, label: "Passos", category: "Atividade" },
    UnitInfo { value: Unit::Milliliters, label: "Mililitros", category: "Volume" },
    UnitInfo { value: Unit::Liters, label: "Litros", category: "Volume" },
    UnitInfo { value: Unit::Kilograms, label: "Quilogramas", category: "Peso" },
    UnitInfo { value: Unit::Grams, label: "Gramas", category: "Peso" },
    UnitInfo { value: Unit::Percent, label: "Porcentagem", category: "Progresso" },
    UnitInfo { value: Unit::Pomodoros, label: "Pomodoros", category: "Produtividade" },
    UnitInfo { value: Unit::Money, label: "Dinheiro (R$)", category: "Financeiro" },
];

/// Units pre-selected in a freshly created profile.
pub const DEFAULT_PREFERRED_UNITS: [Unit; 5] = [
    Unit::Times,
    Unit::Minutes,
    Unit::Pages,
    Unit::Kilometers,
    Unit::Milliliters,
];

impl Unit {
    /// The code stored in the database and sent over the wire.
    pub fn code(self) -> &'static str {
        match self {
            Unit::Times => "times",
            Unit::Minutes => "min",
            Unit::Hours => "hours",
            Unit::Pages => "pages",
            Unit::Kilometers => "km",
            Unit::Meters => "m",
            Unit::Steps => "steps",
            Unit::Milliliters => "ml",
            Unit::Liters => "L",
            Unit::Kilograms => "kg",
            Unit::Grams => "g",
            Unit::Percent => "%",
            Unit::Pomodoros => "pomodoros",
            Unit::Money => "money",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Unit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UNITS
            .iter()
            .map(|info| info.value)
            .find(|unit| unit.code() == s)
            .ok_or_else(|| CoreError::validation(format!("Unknown unit '{s}'")))
    }
}

/// Validate a list of unit codes (profile preferred units).
pub fn validate_unit_codes(codes: &[String]) -> Result<(), CoreError> {
    for code in codes {
        code.parse::<Unit>()?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColorInfo {
    pub name: &'static str,
    pub value: &'static str,
    pub hex: &'static str,
}

pub const COLORS: &[ColorInfo] = &[
    ColorInfo { name: "Violeta", value: "violet-500", hex: "#8b5cf6" },
    ColorInfo { name: "Azul", value: "blue-500", hex: "#3b82f6" },
    ColorInfo { name: "Verde", value: "green-500", hex: "#10b981" },
    ColorInfo { name: "Amarelo", value: "yellow-500", hex: "#f59e0b" },
    ColorInfo { name: "Vermelho", value: "red-500", hex: "#ef4444" },
    ColorInfo { name: "Rosa", value: "pink-500", hex: "#ec4899" },
    ColorInfo { name: "Índigo", value: "indigo-500", hex: "#6366f1" },
    ColorInfo { name: "Ciano", value: "cyan-500", hex: "#06b6d4" },
    ColorInfo { name: "Laranja", value: "orange-500", hex: "#f97316" },
    ColorInfo { name: "Esmeralda", value: "emerald-500", hex: "#10b981" },
    ColorInfo { name: "Roxo", value: "purple-500", hex: "#a855f7" },
    ColorInfo { name: "Teal", value: "teal-500", hex: "#14b8a6" },
];

/// Default colour for new habits.
pub const DEFAULT_COLOR: &str = "blue-500";

fn color_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})|[a-z]+-[0-9]{2,3})$")
            .expect("color token pattern is valid")
    })
}

/// A colour is either a hex literal (`#8b5cf6`, `#fff`) or a palette token
/// such as `violet-500`.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    if color_token_regex().is_match(color) {
        Ok(())
    } else {
        Err(CoreError::validation(format!(
            "Invalid color '{color}': expected #RRGGBB or a palette token like violet-500"
        )))
    }
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IconInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
}

pub const ICONS: &[IconInfo] = &[
    IconInfo { name: "target", label: "Alvo", category: "Geral" },
    IconInfo { name: "check-circle", label: "Concluído", category: "Geral" },
    IconInfo { name: "star", label: "Estrela", category: "Geral" },
    IconInfo { name: "heart", label: "Coração", category: "Saúde" },
    IconInfo { name: "activity", label: "Atividade", category: "Saúde" },
    IconInfo { name: "dumbbell", label: "Exercício", category: "Saúde" },
    IconInfo { name: "footprints", label: "Caminhada", category: "Saúde" },
    IconInfo { name: "droplets", label: "Água", category: "Saúde" },
    IconInfo { name: "apple", label: "Alimentação", category: "Saúde" },
    IconInfo { name: "moon", label: "Sono", category: "Saúde" },
    IconInfo { name: "book-open", label: "Leitura", category: "Produtividade" },
    IconInfo { name: "pen-tool", label: "Escrita", category: "Produtividade" },
    IconInfo { name: "laptop", label: "Trabalho", category: "Produtividade" },
    IconInfo { name: "clock", label: "Tempo", category: "Produtividade" },
    IconInfo { name: "brain", label: "Aprendizado", category: "Produtividade" },
    IconInfo { name: "dollar-sign", label: "Dinheiro", category: "Financeiro" },
    IconInfo { name: "piggy-bank", label: "Economia", category: "Financeiro" },
    IconInfo { name: "trending-up", label: "Investimento", category: "Financeiro" },
    IconInfo { name: "users", label: "Família", category: "Relacionamentos" },
    IconInfo { name: "phone", label: "Contato", category: "Relacionamentos" },
    IconInfo { name: "message-circle", label: "Conversa", category: "Relacionamentos" },
    IconInfo { name: "music", label: "Música", category: "Hobbies" },
    IconInfo { name: "camera", label: "Fotografia", category: "Hobbies" },
    IconInfo { name: "palette", label: "Arte", category: "Hobbies" },
    IconInfo { name: "gamepad-2", label: "Jogos", category: "Hobbies" },
];

/// Default icon for new habits.
pub const DEFAULT_ICON: &str = "target";

/// Icon keys are free-form kebab-case; the UI falls back to a circle for
/// names it cannot render, so only the shape is checked.
pub fn validate_icon(icon: &str) -> Result<(), CoreError> {
    let ok = !icon.is_empty()
        && icon.len() <= 64
        && icon
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        Err(CoreError::validation(format!("Invalid icon key '{icon}'")))
    }
}
