mod config;
pub mod builder;
pub mod manual;

use log::debug;
use serde::{Deserialize, Serialize};

pub use crate::config::*;

// ********* Assessments ***********

/// A qualitative rating of one topic: how much work it is, and how likely it is to cause trouble.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assessment {
    pub effort: Severity,
    pub difficulty: Difficulty,
    pub effort_reason: String,
    pub difficulty_reason: String,
}

impl Assessment {
    pub fn new(effort: Severity, difficulty: Difficulty) -> Assessment {
        Assessment {
            effort,
            difficulty,
            effort_reason: String::new(),
            difficulty_reason: String::new(),
        }
    }

    /// The assessment of a topic without a difficulty dimension.
    pub fn without_difficulty(effort: Severity) -> Assessment {
        Assessment::new(effort, Difficulty::NotApplicable)
    }

}

fn licensing_default() -> Assessment {
    Assessment::without_difficulty(Severity::Green)
}

// ********* Housing units ***********

/// One housing unit as it exists today.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentStateRow {
    pub unit_id: String,
    pub category: CurrentCategory,
    pub capacity: u32,
    pub execution: ExecutionType,
    pub chimneys: YesNo,
    pub state_of_the_art: YesNo,
}

impl Default for CurrentStateRow {
    fn default() -> Self {
        CurrentStateRow {
            unit_id: String::new(),
            category: CurrentCategory::default(),
            capacity: 0,
            execution: ExecutionType::default(),
            chimneys: YesNo::Yes,
            state_of_the_art: YesNo::No,
        }
    }
}

/// One housing unit as it is planned.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannedStateRow {
    pub unit_id: String,
    pub category: PlannedCategory,
    pub capacity: u32,
    pub execution: ExecutionType,
}

// ********* Review requirements ***********

/// The regulatory checks that are expected to be necessary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewRequirements {
    pub odour_frequencies: ReviewOutcome,
    pub nitrogen_deposition: ReviewOutcome,
    pub dispersion_current: ReviewOutcome,
    pub dispersion_planned: ReviewOutcome,
    pub dispersion_total: ReviewOutcome,
    pub mitigation_measures: ReviewOutcome,
}

impl Default for ReviewRequirements {
    fn default() -> Self {
        ReviewRequirements {
            odour_frequencies: ReviewOutcome::Yes,
            nitrogen_deposition: ReviewOutcome::Yes,
            dispersion_current: ReviewOutcome::Yes,
            dispersion_planned: ReviewOutcome::Yes,
            dispersion_total: ReviewOutcome::Yes,
            mitigation_measures: ReviewOutcome::No,
        }
    }
}

impl ReviewRequirements {
    /// The checks in display order, with their German titles.
    pub fn entries(&self) -> [(&'static str, ReviewOutcome); 6] {
        [
            ("Ermittlung der Geruchshäufigkeiten", self.odour_frequencies),
            ("Ermittlung der Stickstoffdeposition", self.nitrogen_deposition),
            ("Ausbreitungsberechnung Ist-Zustand", self.dispersion_current),
            ("Ausbreitungsberechnung Plan-Zustand", self.dispersion_planned),
            ("Ausbreitungsberechnung Gesamtbelastung", self.dispersion_total),
            ("Konditionierung von Minderungsmaßnahmen", self.mitigation_measures),
        ]
    }
}

// ********* Site plan ***********

/// An image of the site, embedded in the report.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePlan {
    pub media_type: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl SitePlan {
    /// Wraps raw image bytes, guessing the media type from the file signature.
    pub fn from_bytes(data: Vec<u8>) -> SitePlan {
        let media_type = if data.starts_with(&[0x89, b'P', b'N', b'G']) {
            "image/png"
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            "image/jpeg"
        } else if data.starts_with(b"GIF8") {
            "image/gif"
        } else {
            debug!("SitePlan::from_bytes: unknown image signature, assuming png");
            "image/png"
        };
        SitePlan {
            media_type: media_type.to_string(),
            data,
        }
    }

    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            base64_bytes::encode(&self.data)
        )
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn encode(data: &[u8]) -> String {
        STANDARD.encode(data)
    }

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD
            .decode(s.trim())
            .map_err(serde::de::Error::custom)
    }
}

// ********* Project ***********

/// Everything that is known about one farm project.
///
/// A project starts empty, gets filled from a workbook and by hand, and is then
/// handed over, read-only, to the report renderer.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmProject {
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub project_number: String,

    pub licensing_text: String,
    pub location_text: String,
    pub summary_text: String,

    pub licensing: Assessment,
    pub receptor_sites: Assessment,
    pub neighboring_operations: Assessment,
    pub current_vs_planned: Assessment,

    pub current_state: Vec<CurrentStateRow>,
    pub planned_state: Vec<PlannedStateRow>,

    pub review: ReviewRequirements,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_plan: Option<SitePlan>,
}

impl Default for FarmProject {
    fn default() -> Self {
        FarmProject {
            street: String::new(),
            house_number: String::new(),
            postal_code: String::new(),
            city: String::new(),
            project_number: String::new(),
            licensing_text: String::new(),
            location_text: String::new(),
            summary_text: String::new(),
            licensing: licensing_default(),
            receptor_sites: Assessment::default(),
            neighboring_operations: Assessment::default(),
            current_vs_planned: Assessment::default(),
            current_state: Vec::new(),
            planned_state: Vec::new(),
            review: ReviewRequirements::default(),
            site_plan: None,
        }
    }
}

/// "Hauptstr. 5\n12345 Musterstadt"
pub fn address_label(
    street: &str,
    house_number: &str,
    postal_code: &str,
    city: &str,
) -> String {
    format!("{} {}\n{} {}", street, house_number, postal_code, city)
}

/// An address can only be looked up with a street and a city.
pub fn is_resolvable_address(street: &str, city: &str) -> bool {
    !street.trim().is_empty() && !city.trim().is_empty()
}

impl FarmProject {
    /// "Hauptstr. 5, 12345 Musterstadt"
    pub fn address_one_line(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.street, self.house_number, self.postal_code, self.city
        )
    }

    pub fn total_current_capacity(&self) -> u64 {
        self.current_state.iter().map(|r| r.capacity as u64).sum()
    }

    pub fn total_planned_capacity(&self) -> u64 {
        self.planned_state.iter().map(|r| r.capacity as u64).sum()
    }

    /// The four assessments in report order, with their German topic names.
    pub fn assessments(&self) -> [(&'static str, &Assessment); 4] {
        [
            ("Genehmigungsrecht", &self.licensing),
            ("Immissionsorte", &self.receptor_sites),
            ("Nachbarbetriebe", &self.neighboring_operations),
            ("Ist- und Plan-Zustand", &self.current_vs_planned),
        ]
    }

    /// Checks the invariants that the type system does not already enforce.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.licensing.difficulty != Difficulty::NotApplicable {
            return Err(ModelError::LicensingDifficulty(self.licensing.difficulty));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Green < Severity::Yellow);
        assert!(Severity::Yellow < Severity::Red);
        assert_eq!(
            Severity::ALL.iter().max().cloned(),
            Some(Severity::Red)
        );
    }

    #[test]
    fn css_classes() {
        assert_eq!(Difficulty::NotApplicable.css_class(), "");
        assert_eq!(Difficulty::Level(Severity::Green).css_class(), "ampel-green");
        assert_eq!(Difficulty::Level(Severity::Yellow).css_class(), "ampel-yellow");
        assert_eq!(Difficulty::Level(Severity::Red).css_class(), "ampel-red");
    }

    #[test]
    fn german_color_names() {
        assert_eq!(Severity::from_german("Grün"), Some(Severity::Green));
        assert_eq!("Gelb".parse::<Severity>(), Ok(Severity::Yellow));
        assert_eq!("red".parse::<Severity>(), Ok(Severity::Red));
        assert!("purple".parse::<Severity>().is_err());
    }

    #[test]
    fn difficulty_labels() {
        assert_eq!(
            "Kein Einfluss".parse::<Difficulty>(),
            Ok(Difficulty::NotApplicable)
        );
        assert_eq!(
            "yellow".parse::<Difficulty>(),
            Ok(Difficulty::Level(Severity::Yellow))
        );
        let js = serde_json::to_string(&Difficulty::NotApplicable).unwrap();
        assert_eq!(js, "\"Kein Einfluss\"");
    }

    #[test]
    fn execution_normalization() {
        init();
        assert_eq!(ExecutionType::normalize(""), ExecutionType::ForcedVentilation);
        assert_eq!(ExecutionType::normalize("  "), ExecutionType::ForcedVentilation);
        assert_eq!(
            ExecutionType::normalize("2").label(),
            "2 - Zwangsbelüfteter Stall mit Auslauf"
        );
        assert_eq!(
            ExecutionType::normalize("4 - Außenklimastall mit Auslauf"),
            ExecutionType::OpenClimateWithYard
        );
        assert_eq!(
            ExecutionType::normalize("Tiefstreu"),
            ExecutionType::Unlisted("Tiefstreu".to_string())
        );
        assert_eq!(ExecutionType::normalize("5").label(), "5");
    }

    #[test]
    fn categories_keep_unknown_labels() {
        assert_eq!(
            CurrentCategory::from("Neu".to_string()),
            CurrentCategory::New
        );
        assert_eq!(
            PlannedCategory::from("Keine".to_string()),
            PlannedCategory::Discontinued
        );
        // "Keine" is not part of the current-state list.
        assert_eq!(
            CurrentCategory::from("Keine".to_string()),
            CurrentCategory::Unlisted("Keine".to_string())
        );
        assert_eq!(
            String::from(PlannedCategory::Species(Species::DairyCows)),
            "Milchkühe"
        );
    }

    #[test]
    fn yes_no_lenient() {
        init();
        assert_eq!(YesNo::from_lenient("Ja"), YesNo::Yes);
        assert_eq!(YesNo::from_lenient(" ja "), YesNo::Yes);
        assert_eq!(YesNo::from_lenient("Nein"), YesNo::No);
        assert_eq!(YesNo::from_lenient("vielleicht"), YesNo::No);
        assert_eq!(YesNo::from_lenient(""), YesNo::No);
        assert_eq!(YesNo::from_lenient("falsch"), YesNo::No);
        // Unrecognized answers are logged and read as no.
        assert_eq!(YesNo::from_lenient("vorhanden"), YesNo::No);
        assert_eq!(YesNo::from_lenient("Eher ja"), YesNo::No);
    }

    #[test]
    fn default_project_is_valid() {
        let p = FarmProject::default();
        assert_eq!(p.licensing.difficulty, Difficulty::NotApplicable);
        assert_eq!(p.receptor_sites.difficulty, Difficulty::Level(Severity::Green));
        assert_eq!(p.review.mitigation_measures, ReviewOutcome::No);
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn licensing_with_difficulty_is_rejected() {
        let mut p = FarmProject::default();
        p.licensing.difficulty = Difficulty::Level(Severity::Red);
        assert!(matches!(
            p.validate(),
            Err(ModelError::LicensingDifficulty(_))
        ));
    }

    #[test]
    fn address_strings() {
        let p = FarmProject {
            street: "Hauptstr.".to_string(),
            house_number: "5".to_string(),
            postal_code: "12345".to_string(),
            city: "Musterstadt".to_string(),
            ..FarmProject::default()
        };
        assert_eq!(p.address_one_line(), "Hauptstr. 5, 12345 Musterstadt");
        assert_eq!(
            address_label(&p.street, &p.house_number, &p.postal_code, &p.city),
            "Hauptstr. 5\n12345 Musterstadt"
        );
    }

    #[test]
    fn resolvable_address_needs_street_and_city() {
        assert!(is_resolvable_address("Hauptstr.", "Musterstadt"));
        assert!(!is_resolvable_address(" ", "Musterstadt"));
        assert!(!is_resolvable_address("Hauptstr.", "\t"));
        assert_eq!(
            address_label("Hauptstr.", "", "", "Musterstadt"),
            "Hauptstr. \n Musterstadt"
        );
    }

    #[test]
    fn json_defaults_and_site_plan() {
        let p: FarmProject = serde_json::from_str(
            r#"{"street": "Dorfweg", "sitePlan": {"mediaType": "image/png", "data": "iVBORw=="}}"#,
        )
        .unwrap();
        assert_eq!(p.street, "Dorfweg");
        assert_eq!(p.licensing.difficulty, Difficulty::NotApplicable);
        let plan = p.site_plan.unwrap();
        assert_eq!(plan.data, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(plan.data_uri(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn site_plan_media_type() {
        assert_eq!(
            SitePlan::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]).media_type,
            "image/jpeg"
        );
        assert_eq!(
            SitePlan::from_bytes(vec![0x89, b'P', b'N', b'G']).media_type,
            "image/png"
        );
    }
}
