// Primitives shared by the readers and writers.

use calamine::{DataType, Range};
use std::path::Path;

use crate::report::*;

/// The text of a cell, or None if the cell is missing or blank.
///
/// Numbers are written the way they appear in the sheet: whole numbers
/// without a decimal part.
pub fn cell_text(range: &Range<DataType>, row: u32, col: u32) -> Option<String> {
    match range.get_value((row, col)) {
        Some(DataType::String(s)) if s.trim().is_empty() => None,
        Some(DataType::String(s)) => Some(s.clone()),
        Some(DataType::Int(i)) => Some(i.to_string()),
        Some(DataType::Float(f)) => Some(format_number(*f)),
        Some(DataType::Bool(b)) => Some(b.to_string()),
        Some(DataType::Empty) | None => None,
        Some(other) => {
            debug!(
                "cell_text: ({}, {}): unreadable cell {:?}",
                row + 1,
                col + 1,
                other
            );
            None
        }
    }
}

/// A count of animal places. Anything that is not a number counts as 0.
/// Fractions are truncated and negative numbers become 0.
pub fn cell_count(range: &Range<DataType>, row: u32, col: u32) -> u32 {
    let value: Option<f64> = match range.get_value((row, col)) {
        Some(DataType::Int(i)) => Some(*i as f64),
        Some(DataType::Float(f)) => Some(*f),
        Some(DataType::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match value {
        Some(x) if x.is_finite() && x > 0.0 => x.trunc().min(u32::MAX as f64) as u32,
        Some(_) => 0,
        None => {
            debug!(
                "cell_count: ({}, {}): no number found, using 0",
                row + 1,
                col + 1
            );
            0
        }
    }
}

fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The name of the document for a project, based on its project number.
pub fn report_file_name(project: &FarmProject, variant: ReportVariant) -> String {
    let pnr = project.project_number.trim();
    let pnr = if pnr.is_empty() { "ENTWURF" } else { pnr };
    match variant {
        ReportVariant::Full => format!("Vorabschätzung-{}.pdf", pnr),
        ReportVariant::Short => format!("Vorabschätzung-Kurz-{}.pdf", pnr),
    }
}

pub fn write_bytes(path: &str, content: &[u8]) -> HfvResult<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating path: {:?}", parent);
            fs::create_dir_all(parent).context(WritingFileSnafu { path })?;
        }
    }
    fs::write(path, content).context(WritingFileSnafu { path })
}
