use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};

use factorbench_report::config::{load_report_config, ReportConfig};

pub fn build_command() -> Command {
    Command::new("factorbench")
        .version(clap::crate_version!())
        .about("Figures and summary statistics for quantum factoring benchmark results")
        .arg(
            Arg::new("config")
                .help("Path to a JSON report configuration file")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help(
                    "Benchmark results CSV. Overrides the input specified in the \
                     configuration file. [default: benchmark-results.csv]",
                )
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .help(
                    "Directory the figures are written to. Overrides the directory \
                     specified in the configuration file. [default: plots]",
                )
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("dpi")
                .long("dpi")
                .help("Figure resolution in dots per inch. [default: 300]")
                .value_parser(clap::value_parser!(u32).range(10..)),
        )
        .arg(
            Arg::new("print_config")
                .long("print-config")
                .help("Print the effective configuration as JSON and exit.")
                .action(ArgAction::SetTrue),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
}

/// Resolve the report configuration: the optional JSON file first, then any
/// command line overrides on top.
pub fn config_from_arguments(matches: &ArgMatches) -> Result<ReportConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[factorbench] Using config: {:?}", path);
            load_report_config(path)?
        }
        None => {
            log::debug!("[factorbench] No config provided; using defaults.");
            ReportConfig::default()
        }
    };

    if let Some(input) = matches.get_one::<PathBuf>("input") {
        config.input = input.clone();
    }

    if let Some(output_dir) = matches.get_one::<PathBuf>("output_dir") {
        config.output_dir = output_dir.clone();
    }

    if let Some(dpi) = matches.get_one::<u32>("dpi") {
        config.dpi = *dpi;
    }

    Ok(config)
}
