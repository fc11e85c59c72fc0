// Reader for the farm workbook (sheet 'Daten').

use calamine::{DataType, Range, Reader, Xlsx};
use serde::Serialize;
use std::io::Cursor;

use crate::report::{
    io_common::{cell_count, cell_text},
    *,
};

#[derive(Debug, Snafu)]
pub enum ExtractionError {
    #[snafu(display("The workbook could not be opened: {source}"))]
    OpeningWorkbook { source: calamine::XlsxError },
    #[snafu(display("The workbook does not contain any worksheet"))]
    NoWorksheet {},
    #[snafu(display("The worksheet {sheet:?} could not be read: {source}"))]
    ReadingSheet {
        source: calamine::XlsxError,
        sheet: String,
    },
    #[snafu(display("Invalid workbook layout: {message}"))]
    Layout { message: String },
}

// Columns of the unit table (0-based).
const COL_UNIT_ID: u32 = 0;
const COL_CURRENT_CATEGORY: u32 = 1;
const COL_CURRENT_CAPACITY: u32 = 2;
const COL_CURRENT_EXECUTION: u32 = 3;
const COL_CHIMNEYS: u32 = 4;
const COL_STATE_OF_THE_ART: u32 = 5;
const COL_PLANNED_CATEGORY: u32 = 6;
const COL_PLANNED_CAPACITY: u32 = 7;
const COL_PLANNED_EXECUTION: u32 = 8;

/// What the workbook tells about a project: the address and the housing units.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub project_number: String,
    pub email: String,
    pub current_state: Vec<CurrentStateRow>,
    pub planned_state: Vec<PlannedStateRow>,
}

impl ExtractedData {
    /// Copies the address and replaces the housing units of an existing project.
    /// Texts, assessments and the site plan are left as they are.
    pub fn apply_to(&self, project: &mut FarmProject) {
        project.street = self.street.clone();
        project.house_number = self.house_number.clone();
        project.postal_code = self.postal_code.clone();
        project.city = self.city.clone();
        project.project_number = self.project_number.clone();
        project.current_state = self.current_state.clone();
        project.planned_state = self.planned_state.clone();
    }

    pub fn into_project(self) -> FarmProject {
        let mut project = FarmProject::default();
        self.apply_to(&mut project);
        project
    }
}

/// Reads the raw bytes of an xlsx workbook.
///
/// The whole call fails if the workbook cannot be opened. Missing or malformed
/// cells never fail: they are replaced by defaults.
pub fn extract_workbook(
    bytes: &[u8],
    layout: &WorkbookLayout,
) -> Result<ExtractedData, ExtractionError> {
    let wrange = get_range(bytes, layout)?;
    let address_col = layout
        .address_column_index()
        .map_err(|e| ExtractionError::Layout {
            message: e.to_string(),
        })?;

    let scalar = |row: u32| -> String {
        cell_text(&wrange, row, address_col)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let mut res = ExtractedData {
        street: scalar(0),
        house_number: scalar(1),
        postal_code: scalar(2),
        city: scalar(3),
        project_number: scalar(4),
        email: scalar(5),
        ..ExtractedData::default()
    };
    debug!(
        "extract_workbook: address: {:?} project: {:?}",
        format!(
            "{} {}, {} {}",
            res.street, res.house_number, res.postal_code, res.city
        ),
        res.project_number
    );

    for row in layout.unit_rows() {
        if let Some((current, planned)) = read_unit_row(&wrange, row) {
            debug!("extract_workbook: row {}: {:?} {:?}", row + 1, current, planned);
            res.current_state.push(current);
            res.planned_state.push(planned);
        }
    }

    info!(
        "extract_workbook: {} housing unit(s) found",
        res.current_state.len()
    );
    Ok(res)
}

// A row is read if it has a unit id or a current category.
fn read_unit_row(
    wrange: &Range<DataType>,
    row: u32,
) -> Option<(CurrentStateRow, PlannedStateRow)> {
    let unit_id = cell_text(wrange, row, COL_UNIT_ID).map(|s| s.trim().to_string());
    let current_category =
        cell_text(wrange, row, COL_CURRENT_CATEGORY).map(|s| s.trim().to_string());
    if unit_id.is_none() && current_category.is_none() {
        return None;
    }
    let unit_id = unit_id.unwrap_or_default();

    let current = CurrentStateRow {
        unit_id: unit_id.clone(),
        category: current_category
            .map(CurrentCategory::from)
            .unwrap_or_default(),
        capacity: cell_count(wrange, row, COL_CURRENT_CAPACITY),
        execution: read_execution(wrange, row, COL_CURRENT_EXECUTION),
        chimneys: read_yes_no(wrange, row, COL_CHIMNEYS),
        state_of_the_art: read_yes_no(wrange, row, COL_STATE_OF_THE_ART),
    };

    let planned = PlannedStateRow {
        unit_id,
        category: cell_text(wrange, row, COL_PLANNED_CATEGORY)
            .map(|s| PlannedCategory::from(s.trim().to_string()))
            .unwrap_or_default(),
        capacity: cell_count(wrange, row, COL_PLANNED_CAPACITY),
        execution: read_execution(wrange, row, COL_PLANNED_EXECUTION),
    };

    Some((current, planned))
}

fn read_execution(wrange: &Range<DataType>, row: u32, col: u32) -> ExecutionType {
    let raw = cell_text(wrange, row, col).unwrap_or_default();
    let et = ExecutionType::normalize(&raw);
    if let ExecutionType::Unlisted(s) = &et {
        debug!(
            "read_execution: ({}, {}): keeping unknown execution {:?}",
            row + 1,
            col + 1,
            s
        );
    }
    et
}

fn read_yes_no(wrange: &Range<DataType>, row: u32, col: u32) -> YesNo {
    match cell_text(wrange, row, col) {
        Some(s) => YesNo::from_lenient(&s),
        None => YesNo::No,
    }
}

fn get_range(
    bytes: &[u8],
    layout: &WorkbookLayout,
) -> Result<Range<DataType>, ExtractionError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).context(OpeningWorkbookSnafu {})?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    debug!("get_range: worksheets: {:?}", sheet_names);

    let worksheet_name = if sheet_names.iter().any(|n| *n == layout.sheet_name) {
        layout.sheet_name.clone()
    } else {
        let first = sheet_names.first().cloned().context(NoWorksheetSnafu {})?;
        info!(
            "Worksheet {:?} not found, using the first worksheet {:?}",
            layout.sheet_name, first
        );
        first
    };

    let wrange = workbook
        .worksheet_range(&worksheet_name)
        .context(NoWorksheetSnafu {})?
        .context(ReadingSheetSnafu {
            sheet: worksheet_name.clone(),
        })?;
    Ok(wrange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{Workbook, Worksheet};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn write_address(ws: &mut Worksheet) {
        ws.write_string(0, 1, "Hauptstr.").unwrap();
        ws.write_string(1, 1, "5").unwrap();
        ws.write_string(2, 1, "12345").unwrap();
        ws.write_string(3, 1, "Musterstadt").unwrap();
        ws.write_string(4, 1, "P-001").unwrap();
    }

    // Row 9 of the workbook, as in the example export.
    fn write_example_unit(ws: &mut Worksheet, row: u32) {
        ws.write_string(row, 0, "BE1").unwrap();
        ws.write_string(row, 1, "Mastschweine").unwrap();
        ws.write_number(row, 2, 100.0).unwrap();
        ws.write_string(row, 3, "1").unwrap();
        ws.write_string(row, 4, "Ja").unwrap();
        ws.write_string(row, 5, "Nein").unwrap();
        ws.write_string(row, 6, "Mastschweine").unwrap();
        ws.write_number(row, 7, 120.0).unwrap();
        ws.write_string(row, 8, "2").unwrap();
    }

    fn extract(workbook: &mut Workbook) -> ExtractedData {
        let buffer = workbook.save_to_buffer().unwrap();
        extract_workbook(&buffer, &WorkbookLayout::default()).unwrap()
    }

    #[test]
    fn example_export() {
        init();
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("Daten").unwrap();
        write_address(ws);
        write_example_unit(ws, 8);

        let data = extract(&mut workbook);
        assert_eq!(data.street, "Hauptstr.");
        assert_eq!(data.house_number, "5");
        assert_eq!(data.postal_code, "12345");
        assert_eq!(data.city, "Musterstadt");
        assert_eq!(data.project_number, "P-001");
        assert_eq!(data.email, "");

        assert_eq!(data.current_state.len(), 1);
        let current = &data.current_state[0];
        assert_eq!(current.unit_id, "BE1");
        assert_eq!(current.capacity, 100);
        assert_eq!(current.execution.label(), "1 - Zwangsbelüfteter Stall");
        assert_eq!(current.chimneys, YesNo::Yes);
        assert_eq!(current.state_of_the_art, YesNo::No);

        assert_eq!(data.planned_state.len(), 1);
        let planned = &data.planned_state[0];
        assert_eq!(planned.unit_id, "BE1");
        assert_eq!(planned.capacity, 120);
        assert_eq!(
            planned.execution.label(),
            "2 - Zwangsbelüfteter Stall mit Auslauf"
        );
    }

    #[test]
    fn empty_rows_do_not_stop_the_scan() {
        init();
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("Daten").unwrap();
        write_example_unit(ws, 8);
        // Rows 10 to 19 are empty, then one unit with only a category, and
        // one on the very last row of the table.
        ws.write_string(19, 1, "Milchkühe").unwrap();
        ws.write_string(49, 0, "BE42").unwrap();
        // Outside of the table.
        ws.write_string(50, 0, "BE43").unwrap();

        let data = extract(&mut workbook);
        let ids: Vec<&str> = data
            .current_state
            .iter()
            .map(|r| r.unit_id.as_str())
            .collect();
        assert_eq!(ids, vec!["BE1", "", "BE42"]);
        assert_eq!(data.planned_state.len(), 3);
        assert_eq!(
            data.current_state[1].category,
            CurrentCategory::Species(Species::DairyCows)
        );
    }

    #[test]
    fn malformed_cells_get_defaults() {
        init();
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("Daten").unwrap();
        ws.write_string(8, 0, "BE7").unwrap();
        ws.write_string(8, 2, "viele").unwrap();
        ws.write_string(8, 3, "Tiefstreustall").unwrap();
        ws.write_number(8, 7, -5.0).unwrap();
        ws.write_string(9, 0, "BE8").unwrap();
        ws.write_number(9, 2, 99.7).unwrap();
        ws.write_string(9, 7, " 250 ").unwrap();
        ws.write_string(9, 6, "Keine").unwrap();

        let data = extract(&mut workbook);
        let first = &data.current_state[0];
        assert_eq!(first.capacity, 0);
        assert_eq!(first.category, CurrentCategory::Species(Species::FatteningPigs));
        assert_eq!(
            first.execution,
            ExecutionType::Unlisted("Tiefstreustall".to_string())
        );
        assert_eq!(first.chimneys, YesNo::No);
        assert_eq!(first.state_of_the_art, YesNo::No);
        assert_eq!(data.planned_state[0].capacity, 0);
        assert_eq!(
            data.planned_state[0].execution,
            ExecutionType::ForcedVentilation
        );

        assert_eq!(data.current_state[1].capacity, 99);
        assert_eq!(data.planned_state[1].capacity, 250);
        assert_eq!(data.planned_state[1].category, PlannedCategory::Discontinued);
    }

    #[test]
    fn execution_ordinals() {
        init();
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("Daten").unwrap();
        for (idx, value) in ["1", "2", "3", "4"].iter().enumerate() {
            let row = 8 + idx as u32;
            ws.write_string(row, 0, format!("BE{}", idx + 1)).unwrap();
            ws.write_string(row, 3, *value).unwrap();
        }
        // A number instead of a text.
        ws.write_string(12, 0, "BE5").unwrap();
        ws.write_number(12, 3, 3.0).unwrap();

        let data = extract(&mut workbook);
        let labels: Vec<&str> = data
            .current_state
            .iter()
            .map(|r| r.execution.label())
            .collect();
        assert_eq!(
            labels,
            vec![
                "1 - Zwangsbelüfteter Stall",
                "2 - Zwangsbelüfteter Stall mit Auslauf",
                "3 - Außenklimastall",
                "4 - Außenklimastall mit Auslauf",
                "3 - Außenklimastall",
            ]
        );
    }

    #[test]
    fn numeric_address_cells() {
        init();
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("Daten").unwrap();
        ws.write_string(0, 1, "  Dorfweg ").unwrap();
        ws.write_number(1, 1, 12.0).unwrap();
        ws.write_number(2, 1, 48683.0).unwrap();
        ws.write_string(5, 1, "info@example.org").unwrap();

        let data = extract(&mut workbook);
        assert_eq!(data.street, "Dorfweg");
        assert_eq!(data.house_number, "12");
        assert_eq!(data.postal_code, "48683");
        assert_eq!(data.email, "info@example.org");
        assert!(data.current_state.is_empty());
    }

    #[test]
    fn falls_back_to_first_sheet() {
        init();
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("Export").unwrap();
        write_address(ws);
        let other = workbook.add_worksheet();
        other.set_name("Notizen").unwrap();
        other.write_string(0, 1, "nicht diese").unwrap();

        let data = extract(&mut workbook);
        assert_eq!(data.street, "Hauptstr.");
    }

    #[test]
    fn named_sheet_wins_over_first() {
        init();
        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.set_name("Deckblatt").unwrap();
        first.write_string(0, 1, "falsch").unwrap();
        let ws = workbook.add_worksheet();
        ws.set_name("Daten").unwrap();
        write_address(ws);

        let data = extract(&mut workbook);
        assert_eq!(data.street, "Hauptstr.");
    }

    #[test]
    fn corrupt_workbook_is_an_error() {
        init();
        let res = extract_workbook(b"this is not a workbook", &WorkbookLayout::default());
        assert!(matches!(res, Err(ExtractionError::OpeningWorkbook { .. })));
    }

    #[test]
    fn apply_keeps_assessments() {
        let mut project = FarmProject {
            summary_text: "bleibt".to_string(),
            ..FarmProject::default()
        };
        project.receptor_sites.effort = Severity::Red;
        let data = ExtractedData {
            street: "Hauptstr.".to_string(),
            current_state: vec![CurrentStateRow::default()],
            ..ExtractedData::default()
        };
        data.apply_to(&mut project);
        assert_eq!(project.street, "Hauptstr.");
        assert_eq!(project.summary_text, "bleibt");
        assert_eq!(project.receptor_sites.effort, Severity::Red);
        assert_eq!(project.current_state.len(), 1);
        assert!(project.planned_state.is_empty());
    }
}
