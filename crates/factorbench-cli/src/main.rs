use anyhow::Result;
use log::LevelFilter;

use factorbench_cli::input::{build_command, config_from_arguments};
use factorbench_report::report::ReportGenerator;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("FACTORBENCH_LOG", "error,factorbench=info"))
        .init();

    let matches = build_command().get_matches();
    let config = config_from_arguments(&matches)?;

    if matches.get_flag("print_config") {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    log::info!(
        "[factorbench] Reading {:?}, writing figures to {:?}",
        config.input,
        config.output_dir
    );

    match ReportGenerator::new(config).run() {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Report generation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
