use crate::report::*;

use serde::{Deserialize, Serialize};

/// Where the data sits in the workbook.
///
/// The defaults are the layout of the exports from the farm management software.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookLayout {
    #[serde(rename = "sheetName")]
    pub sheet_name: String,
    /// Excel-style column letter of the address cells.
    #[serde(rename = "addressColumn")]
    pub address_column: String,
    /// First row (1-based) of the housing unit table.
    #[serde(rename = "firstUnitRow")]
    pub first_unit_row: u32,
    /// Last row (1-based, inclusive) of the housing unit table.
    #[serde(rename = "lastUnitRow")]
    pub last_unit_row: u32,
}

impl Default for WorkbookLayout {
    fn default() -> Self {
        WorkbookLayout {
            sheet_name: "Daten".to_string(),
            address_column: "B".to_string(),
            first_unit_row: 9,
            last_unit_row: 50,
        }
    }
}

impl WorkbookLayout {
    /// The 0-based index of the address column.
    pub fn address_column_index(&self) -> HfvResult<u32> {
        read_column_letter(&self.address_column)
    }

    /// The 0-based rows of the unit table.
    pub fn unit_rows(&self) -> std::ops::RangeInclusive<u32> {
        self.first_unit_row.saturating_sub(1)..=self.last_unit_row.saturating_sub(1)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    /// Base URL of a Nominatim-compatible service.
    pub endpoint: String,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,
    pub country: String,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        GeocoderSettings {
            endpoint: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "haltungsform-vorabschaetzung".to_string(),
            timeout_secs: 10,
            country: "Germany".to_string(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    pub basemap: String,
    pub scale: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        MapSettings {
            base_url: "https://www.tim-online.nrw.de/tim-online2/".to_string(),
            basemap: "basemapDE".to_string(),
            scale: 2047,
        }
    }
}

/// The external program that turns the HTML report into a PDF.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            program: "weasyprint".to_string(),
            args: vec!["-".to_string(), "-".to_string()],
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HfvConfig {
    pub workbook: WorkbookLayout,
    pub geocoder: GeocoderSettings,
    pub map: MapSettings,
    pub layout: LayoutSettings,
}

/// Reads the configuration file, or returns the defaults if no file is given.
pub fn read_config(path: Option<&str>) -> HfvResult<HfvConfig> {
    match path {
        None => Ok(HfvConfig::default()),
        Some(p) => {
            let contents = fs::read_to_string(p).context(OpeningFileSnafu { path: p })?;
            let config: HfvConfig =
                serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path: p })?;
            debug!("read_config: {:?}", config);
            Ok(config)
        }
    }
}

/// Reads a project file written by `hfv extract` (and possibly edited by hand).
pub fn read_project(path: &str) -> HfvResult<FarmProject> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let project: FarmProject =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(project)
}

// Excel-style column letters: "A" is 0, "Z" is 25, "AA" is 26.
fn read_column_letter(s: &str) -> HfvResult<u32> {
    let letters = s.trim();
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return InvalidColumnSnafu { column: s }.fail();
    }
    let idx = letters
        .to_ascii_uppercase()
        .chars()
        .try_fold(0u32, |acc, c| {
            acc.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)
        });
    match idx {
        Some(idx) => Ok(idx - 1),
        None => InvalidColumnSnafu { column: s }.fail(),
    }
}
