use log::{debug, info, warn};

pub use farm_project::*;
use snafu::{prelude::*, Snafu};

use std::fs;

pub mod config_reader;
pub mod io_common;
pub mod io_xlsx;
pub mod locate;
pub mod render;
pub mod texts;

use crate::report::config_reader::*;
use crate::report::io_common::{report_file_name, simplify_file_name, write_bytes};
use crate::report::io_xlsx::{extract_workbook, ExtractionError};
use crate::report::locate::{AddressQuery, LocationResolver, NominatimGeocoder};
use crate::report::render::{
    render_document, render_markup, CommandLayout, RenderContext, RenderError,
};
pub use crate::report::render::ReportVariant;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum HfvError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}: {source}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing to JSON: {source}"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Not a column letter: {column:?}"))]
    InvalidColumn { column: String },
    #[snafu(display("Extraction failed: {source}"), context(false))]
    Extraction { source: ExtractionError },
    #[snafu(display("Rendering failed: {source}"), context(false))]
    Render { source: RenderError },
    #[snafu(display("The project is not valid: {source}"))]
    InvalidProject { source: ModelError },
    #[snafu(display("Not a date (expected dd.mm.yyyy): {value:?}"))]
    InvalidDate {
        source: chrono::ParseError,
        value: String,
    },
    #[snafu(display("The HTTP client could not be created: {source}"))]
    HttpClient { source: reqwest::Error },
}

pub type HfvResult<T> = Result<T, HfvError>;

/// Reads a workbook and writes the extracted data as JSON to `out_path`, or to
/// the standard output.
///
/// With `raw`, the extracted data is written as is (including the contact
/// e-mail). Otherwise it is written as a project file that `render` accepts.
pub fn run_extract(
    config: &HfvConfig,
    input_path: &str,
    out_path: Option<&str>,
    sheet: Option<&str>,
    raw: bool,
) -> HfvResult<()> {
    info!("Reading workbook {}", simplify_file_name(input_path));
    let bytes = fs::read(input_path).context(OpeningFileSnafu { path: input_path })?;

    let mut layout = config.workbook.clone();
    if let Some(s) = sheet {
        layout.sheet_name = s.to_string();
    }
    let data = extract_workbook(&bytes, &layout)?;

    let js = if raw {
        serde_json::to_string_pretty(&data).context(SerializingJsonSnafu {})?
    } else {
        serde_json::to_string_pretty(&data.into_project()).context(SerializingJsonSnafu {})?
    };

    match out_path {
        None | Some("stdout") => {
            println!("{}", js);
        }
        Some(p) => {
            write_bytes(p, js.as_bytes())?;
            info!("Project written to {}", p);
        }
    }
    Ok(())
}

/// Resolves an address into a map link and prints it.
///
/// The address comes either from a project file or from the query. An address
/// that cannot be located is not an error: a warning is printed instead.
pub fn run_locate(
    config: &HfvConfig,
    project_path: Option<&str>,
    query: AddressQuery,
    scale: Option<u32>,
) -> HfvResult<Option<String>> {
    let query = match project_path {
        Some(p) => AddressQuery::from_project(&read_project(p)?),
        None => query,
    };
    let scale = scale.unwrap_or(config.map.scale);
    debug!("run_locate: query: {:?} scale: {}", query, scale);

    let geocoder = NominatimGeocoder::new(&config.geocoder).context(HttpClientSnafu {})?;
    let resolver = LocationResolver::new(geocoder, config.map.clone());
    let url = resolver.resolve(
        &query.street,
        &query.house_number,
        &query.postal_code,
        &query.city,
        scale,
    );
    match &url {
        Some(u) => println!("{}", u),
        None => eprintln!("Die Adresse konnte nicht gefunden werden."),
    }
    Ok(url)
}

/// Everything the render command needs to know.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub input: String,
    pub variant: ReportVariant,
    pub out_path: Option<String>,
    pub site_plan_path: Option<String>,
    /// dd.mm.yyyy, today if missing.
    pub date: Option<String>,
    /// Writes the HTML markup instead of the document.
    pub html: bool,
}

/// Renders a project file. Returns the path of the file written.
pub fn run_render(config: &HfvConfig, request: &RenderRequest) -> HfvResult<String> {
    let mut project = read_project(&request.input)?;
    if let Some(p) = &request.site_plan_path {
        let image = fs::read(p).context(OpeningFileSnafu { path: p.as_str() })?;
        info!("Site plan: {} ({} bytes)", simplify_file_name(p), image.len());
        project.site_plan = Some(SitePlan::from_bytes(image));
    }
    project.validate().context(InvalidProjectSnafu {})?;

    let date = parse_date(request.date.as_deref())?;
    let ctx = RenderContext::new(date);

    let default_name = report_file_name(&project, request.variant);
    if request.html {
        let markup = render_markup(&project, request.variant, &ctx)?;
        let path = request
            .out_path
            .clone()
            .unwrap_or_else(|| default_name.replace(".pdf", ".html"));
        write_bytes(&path, markup.as_bytes())?;
        info!("Markup written to {}", path);
        return Ok(path);
    }

    let layout = CommandLayout::new(&config.layout);
    let bytes = render_document(&project, request.variant, &ctx, &layout)?;
    let path = request.out_path.clone().unwrap_or(default_name);
    write_bytes(&path, &bytes)?;
    info!("Document written to {} ({} bytes)", path, bytes.len());
    Ok(path)
}

fn parse_date(value: Option<&str>) -> HfvResult<chrono::NaiveDate> {
    match value {
        None => Ok(chrono::Local::now().date_naive()),
        Some(s) => chrono::NaiveDate::parse_from_str(s.trim(), "%d.%m.%Y")
            .context(InvalidDateSnafu { value: s }),
    }
}

/// Prints an error the way the command line tool reports it.
pub fn report_error(e: &HfvError) {
    warn!("Error occured {:?}", e);
    eprintln!("An error occured: {}", e);
    if let Some(bt) = snafu::ErrorCompat::backtrace(e) {
        eprintln!("trace: {}", bt);
    }
}
