use fern::colors::{Color, ColoredLevelConfig};
use log::{warn, LevelFilter};
use std::str::FromStr;
use std::time::SystemTime;

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(level.trim()).ok()
}

pub fn setup_logger(level: &str) -> Result<(), fern::InitError> {
    let filter = parse_level(level);
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(filter.unwrap_or(LevelFilter::Info))
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;

    if filter.is_none() {
        warn!("Unknown log_level '{level}', logging at info");
    }
    Ok(())
}
