// ********* Rating scales ***********

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The traffic-light ("Ampel") rating used for effort and difficulty.
///
/// The variants are declared from the lowest to the highest severity, so the
/// derived ordering is the severity ordering.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Green,
    Yellow,
    Red,
}

/// Presentation attributes of a severity level.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
pub struct AmpelDisplay {
    pub hex: &'static str,
    pub bg: &'static str,
    /// German name of the color, as offered in the selection lists.
    pub name: &'static str,
    pub label: &'static str,
    pub css_class: &'static str,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Green, Severity::Yellow, Severity::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Green => "green",
            Severity::Yellow => "yellow",
            Severity::Red => "red",
        }
    }

    pub fn display(&self) -> AmpelDisplay {
        match self {
            Severity::Green => AmpelDisplay {
                hex: "#34C759",
                bg: "rgba(52,199,89,0.3)",
                name: "Grün",
                label: "unbedenklich / gering",
                css_class: "ampel-green",
            },
            Severity::Yellow => AmpelDisplay {
                hex: "#FFCC00",
                bg: "rgba(255,204,0,0.3)",
                name: "Gelb",
                label: "relevant / vertiefend",
                css_class: "ampel-yellow",
            },
            Severity::Red => AmpelDisplay {
                hex: "#FF3B30",
                bg: "rgba(255,59,48,0.3)",
                name: "Rot",
                label: "kritisch / erheblich",
                css_class: "ampel-red",
            },
        }
    }

    /// Parses the German color name ("Grün", "Gelb", "Rot").
    pub fn from_german(name: &str) -> Option<Severity> {
        Severity::ALL
            .iter()
            .copied()
            .find(|s| s.display().name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Green
    }
}

impl FromStr for Severity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "green" => Ok(Severity::Green),
            "yellow" => Ok(Severity::Yellow),
            "red" => Ok(Severity::Red),
            other => Severity::from_german(other).ok_or_else(|| ModelError::UnknownLabel {
                kind: "severity",
                value: other.to_string(),
            }),
        }
    }
}

pub const NOT_APPLICABLE_LABEL: &str = "Kein Einfluss";

/// The difficulty of a topic: either a severity, or no difficulty dimension at all.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Difficulty {
    Level(Severity),
    /// "Kein Einfluss": the topic has no difficulty dimension.
    NotApplicable,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Level(s) => s.as_str(),
            Difficulty::NotApplicable => NOT_APPLICABLE_LABEL,
        }
    }

    /// The CSS class used to color a table cell. The sentinel gets no class.
    pub fn css_class(&self) -> &'static str {
        match self {
            Difficulty::Level(s) => s.display().css_class,
            Difficulty::NotApplicable => "",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Level(Severity::Green)
    }
}

impl From<Severity> for Difficulty {
    fn from(s: Severity) -> Self {
        Difficulty::Level(s)
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        d.as_str().to_string()
    }
}

impl FromStr for Difficulty {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == NOT_APPLICABLE_LABEL {
            Ok(Difficulty::NotApplicable)
        } else {
            s.parse::<Severity>().map(Difficulty::Level)
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ********* Housing units ***********

/// The animal species shared by the current and the planned state.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Species {
    FatteningPigs,
    PigletRearing,
    SowsBoars,
    SowsWithPiglets,
    Gilts,
    Calves,
    Heifers,
    DairyCows,
    Bulls,
    Broilers,
    LayingHens,
}

impl Species {
    pub const ALL: [Species; 11] = [
        Species::FatteningPigs,
        Species::PigletRearing,
        Species::SowsBoars,
        Species::SowsWithPiglets,
        Species::Gilts,
        Species::Calves,
        Species::Heifers,
        Species::DairyCows,
        Species::Bulls,
        Species::Broilers,
        Species::LayingHens,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Species::FatteningPigs => "Mastschweine",
            Species::PigletRearing => "Ferkelaufzucht",
            Species::SowsBoars => "Sauen/Eber",
            Species::SowsWithPiglets => "Sauen mit Ferkel bis 10kg",
            Species::Gilts => "Jungsauen",
            Species::Calves => "Kälber",
            Species::Heifers => "Färsen",
            Species::DairyCows => "Milchkühe",
            Species::Bulls => "Bullen",
            Species::Broilers => "Hühnchen",
            Species::LayingHens => "Legehennen",
        }
    }

    pub fn from_label(label: &str) -> Option<Species> {
        Species::ALL.iter().copied().find(|s| s.label() == label)
    }
}

/// Animal category of a unit in the current state.
///
/// Labels outside the known list are kept as they were entered.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CurrentCategory {
    Species(Species),
    /// "Neu": the unit does not exist yet.
    New,
    Unlisted(String),
}

impl CurrentCategory {
    pub fn label(&self) -> &str {
        match self {
            CurrentCategory::Species(s) => s.label(),
            CurrentCategory::New => "Neu",
            CurrentCategory::Unlisted(s) => s.as_str(),
        }
    }
}

impl Default for CurrentCategory {
    fn default() -> Self {
        CurrentCategory::Species(Species::FatteningPigs)
    }
}

impl From<String> for CurrentCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Neu" => CurrentCategory::New,
            x => match Species::from_label(x) {
                Some(sp) => CurrentCategory::Species(sp),
                None => CurrentCategory::Unlisted(s),
            },
        }
    }
}

impl From<CurrentCategory> for String {
    fn from(c: CurrentCategory) -> Self {
        match c {
            CurrentCategory::Unlisted(s) => s,
            x => x.label().to_string(),
        }
    }
}

/// Animal category of a unit in the planned state.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PlannedCategory {
    Species(Species),
    /// "Keine": the unit is discontinued.
    Discontinued,
    Unlisted(String),
}

impl PlannedCategory {
    pub fn label(&self) -> &str {
        match self {
            PlannedCategory::Species(s) => s.label(),
            PlannedCategory::Discontinued => "Keine",
            PlannedCategory::Unlisted(s) => s.as_str(),
        }
    }
}

impl Default for PlannedCategory {
    fn default() -> Self {
        PlannedCategory::Species(Species::FatteningPigs)
    }
}

impl From<String> for PlannedCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Keine" => PlannedCategory::Discontinued,
            x => match Species::from_label(x) {
                Some(sp) => PlannedCategory::Species(sp),
                None => PlannedCategory::Unlisted(s),
            },
        }
    }
}

impl From<PlannedCategory> for String {
    fn from(c: PlannedCategory) -> Self {
        match c {
            PlannedCategory::Unlisted(s) => s,
            x => x.label().to_string(),
        }
    }
}

/// How a housing unit is ventilated, and whether the animals have an exercise yard.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ExecutionType {
    ForcedVentilation,
    ForcedVentilationWithYard,
    OpenClimate,
    OpenClimateWithYard,
    /// Free text that did not match any of the known configurations.
    Unlisted(String),
}

impl ExecutionType {
    pub const KNOWN: [ExecutionType; 4] = [
        ExecutionType::ForcedVentilation,
        ExecutionType::ForcedVentilationWithYard,
        ExecutionType::OpenClimate,
        ExecutionType::OpenClimateWithYard,
    ];

    pub fn label(&self) -> &str {
        match self {
            ExecutionType::ForcedVentilation => "1 - Zwangsbelüfteter Stall",
            ExecutionType::ForcedVentilationWithYard => "2 - Zwangsbelüfteter Stall mit Auslauf",
            ExecutionType::OpenClimate => "3 - Außenklimastall",
            ExecutionType::OpenClimateWithYard => "4 - Außenklimastall mit Auslauf",
            ExecutionType::Unlisted(s) => s.as_str(),
        }
    }

    pub fn ordinal(&self) -> Option<u8> {
        match self {
            ExecutionType::ForcedVentilation => Some(1),
            ExecutionType::ForcedVentilationWithYard => Some(2),
            ExecutionType::OpenClimate => Some(3),
            ExecutionType::OpenClimateWithYard => Some(4),
            ExecutionType::Unlisted(_) => None,
        }
    }

    /// Normalizes a raw cell or form value.
    ///
    /// - an empty value is the first configuration
    /// - a bare ordinal ("1" to "4") is expanded to its labeled form
    /// - a known label maps to its configuration
    /// - anything else is kept verbatim (trimmed)
    pub fn normalize(raw: &str) -> ExecutionType {
        let s = raw.trim();
        if s.is_empty() {
            return ExecutionType::ForcedVentilation;
        }
        let known = ExecutionType::KNOWN.iter().find(|et| {
            et.label() == s || et.ordinal().map(|o| o.to_string()).as_deref() == Some(s)
        });
        match known {
            Some(et) => et.clone(),
            None => ExecutionType::Unlisted(s.to_string()),
        }
    }
}

impl Default for ExecutionType {
    fn default() -> Self {
        ExecutionType::ForcedVentilation
    }
}

impl From<String> for ExecutionType {
    fn from(s: String) -> Self {
        ExecutionType::normalize(&s)
    }
}

impl From<ExecutionType> for String {
    fn from(et: ExecutionType) -> Self {
        match et {
            ExecutionType::Unlisted(s) => s,
            x => x.label().to_string(),
        }
    }
}

/// A yes/no answer, written "Ja"/"Nein".
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "Ja")]
    Yes,
    #[serde(rename = "Nein")]
    No,
}

impl YesNo {
    pub fn label(&self) -> &'static str {
        match self {
            YesNo::Yes => "Ja",
            YesNo::No => "Nein",
        }
    }

    /// Lenient reading of a form or spreadsheet value. Only an explicit
    /// yes counts as yes.
    pub fn from_lenient(raw: &str) -> YesNo {
        match raw.trim().to_lowercase().as_str() {
            "ja" | "j" | "yes" | "y" | "x" | "true" | "wahr" | "1" => YesNo::Yes,
            "" | "nein" | "n" | "no" | "false" | "falsch" | "0" | "-" => YesNo::No,
            _ => {
                debug!("YesNo::from_lenient: {:?} is not a yes, read as Nein", raw);
                YesNo::No
            }
        }
    }
}

impl From<bool> for YesNo {
    fn from(b: bool) -> Self {
        if b {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

// ********* Review requirements ***********

/// Expected need for one regulatory sub-check.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum ReviewOutcome {
    #[serde(rename = "Ja")]
    Yes,
    #[serde(rename = "Nein")]
    No,
    #[serde(rename = "Voraussichtlich Nein")]
    ProbablyNot,
    #[serde(rename = "Eher nein")]
    RatherNo,
    #[serde(rename = "Eher ja")]
    RatherYes,
}

impl ReviewOutcome {
    pub const ALL: [ReviewOutcome; 5] = [
        ReviewOutcome::Yes,
        ReviewOutcome::No,
        ReviewOutcome::ProbablyNot,
        ReviewOutcome::RatherNo,
        ReviewOutcome::RatherYes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewOutcome::Yes => "Ja",
            ReviewOutcome::No => "Nein",
            ReviewOutcome::ProbablyNot => "Voraussichtlich Nein",
            ReviewOutcome::RatherNo => "Eher nein",
            ReviewOutcome::RatherYes => "Eher ja",
        }
    }
}

impl FromStr for ReviewOutcome {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReviewOutcome::ALL
            .iter()
            .copied()
            .find(|o| o.label() == s.trim())
            .ok_or_else(|| ModelError::UnknownLabel {
                kind: "review outcome",
                value: s.to_string(),
            })
    }
}

// ********* Errors **********

/// Violations of the model invariants, or labels that cannot be read back.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ModelError {
    /// The licensing topic has no difficulty dimension.
    LicensingDifficulty(Difficulty),
    UnknownLabel { kind: &'static str, value: String },
}

impl Error for ModelError {}

impl Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::LicensingDifficulty(d) => write!(
                f,
                "the licensing assessment has no difficulty, but it was set to {:?}",
                d.as_str()
            ),
            ModelError::UnknownLabel { kind, value } => {
                write!(f, "unknown {} label: {:?}", kind, value)
            }
        }
    }
}
