use clap::{Args as ClapArgs, Parser, Subcommand};

/// Pre-assessment of changes in livestock housing: reads the farm workbook, locates
/// the farm and renders the report.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    /// (file path, optional) A JSON configuration file. Every setting has a default, see the
    /// documentation of the farm_project crate for the format.
    #[clap(long, value_parser, global = true)]
    pub config: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Reads the address and the housing units of a farm workbook (xlsx).
    Extract(ExtractArgs),
    /// Prints a link to the map viewer, centered on the farm.
    Locate(LocateArgs),
    /// Renders the report of a project file into a PDF document.
    Render(RenderArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ExtractArgs {
    /// (file path) The workbook exported by the farm management software.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (file path, 'stdout' or empty) Where to write the project file in JSON format.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default Daten) The name of the worksheet to read. The first worksheet is used if
    /// there is no worksheet with this name.
    #[clap(long, value_parser)]
    pub sheet: Option<String>,

    /// Writes the extracted data as is (including the contact e-mail) instead of a project file.
    #[clap(long, takes_value = false)]
    pub raw: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct LocateArgs {
    /// (file path) A project file. Its address is used instead of the address options.
    #[clap(short, long, value_parser)]
    pub project: Option<String>,

    #[clap(long, value_parser, default_value = "")]
    pub street: String,

    #[clap(long, value_parser, default_value = "")]
    pub house_number: String,

    #[clap(long, value_parser, default_value = "")]
    pub postal_code: String,

    #[clap(long, value_parser, default_value = "")]
    pub city: String,

    /// (default 2047) The scale of the map.
    #[clap(long, value_parser)]
    pub scale: Option<u32>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RenderArgs {
    /// (file path) The project file, as written by the extract command.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// Renders the short report (cover, housing counts, summary and next steps).
    #[clap(long, takes_value = false)]
    pub short: bool,

    /// (file path) The document to write. By default: Vorabschätzung-<project number>.pdf
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) An image (png, jpeg or gif) of the site plan.
    #[clap(long, value_parser)]
    pub site_plan: Option<String>,

    /// (dd.mm.yyyy) The date printed in the report. Today by default.
    #[clap(long, value_parser)]
    pub date: Option<String>,

    /// Writes the HTML markup instead of the PDF document.
    #[clap(long, takes_value = false)]
    pub html: bool,
}
