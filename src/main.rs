mod args;
mod report;

use clap::Parser;
use log::{debug, info};

use crate::args::{Args, Command};
use crate::report::locate::AddressQuery;
use crate::report::*;

fn run(args: &Args) -> HfvResult<()> {
    let config = config_reader::read_config(args.config.as_deref())?;
    match &args.command {
        Command::Extract(a) => run_extract(
            &config,
            &a.input,
            a.out.as_deref(),
            a.sheet.as_deref(),
            a.raw,
        ),
        Command::Locate(a) => {
            let query = AddressQuery {
                street: a.street.clone(),
                house_number: a.house_number.clone(),
                postal_code: a.postal_code.clone(),
                city: a.city.clone(),
            };
            run_locate(&config, a.project.as_deref(), query, a.scale).map(|_| ())
        }
        Command::Render(a) => {
            let request = RenderRequest {
                input: a.input.clone(),
                variant: if a.short {
                    ReportVariant::Short
                } else {
                    ReportVariant::Full
                },
                out_path: a.out.clone(),
                site_plan_path: a.site_plan.clone(),
                date: a.date.clone(),
                html: a.html,
            };
            let path = run_render(&config, &request)?;
            println!("{}", path);
            Ok(())
        }
    }
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }
    debug!("args: {:?}", args);

    if let Err(e) = run(&args) {
        report_error(&e);
        std::process::exit(1);
    }
    info!("Done");
}
