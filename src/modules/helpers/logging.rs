use fern::Dispatch;

use crate::config::AppConfig;

pub fn level_filter(verbosity: &str) -> log::LevelFilter {
    match verbosity.to_uppercase().as_str() {
        "OFF" => log::LevelFilter::Off,
        "ERROR" => log::LevelFilter::Error,
        "WARN" => log::LevelFilter::Warn,
        "DEBUG" => log::LevelFilter::Debug,
        "TRACE" => log::LevelFilter::Trace,
        // default to info
        _ => log::LevelFilter::Info,
    }
}

pub fn setup_logging(config: &AppConfig) -> Result<(), fern::InitError> {
    let base_config = Dispatch::new()
        .level(level_filter(&config.logging_level))
        // rocket logs every request on its own targets
        .level_for("rocket", log::LevelFilter::Warn)
        .level_for("_", log::LevelFilter::Warn);

    let format_config = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(std::io::stdout())
        .chain(fern::log_file(&config.log_file)?);

    base_config
        .chain(format_config)
        .apply()?;

    Ok(())
}
