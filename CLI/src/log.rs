use log::LevelFilter;
use owo_colors::OwoColorize;

/// Log to stderr so `--stdout` output stays a clean header.
pub fn setup_logger(level: LevelFilter) -> Result<(), fern::InitError> {
    let colors = fern::colors::ColoredLevelConfig::new()
        .info(fern::colors::Color::Blue)
        .debug(fern::colors::Color::Cyan)
        .warn(fern::colors::Color::Yellow)
        .error(fern::colors::Color::Red);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {:15}: {}",
                chrono::Local::now().format("%d/%m/%Y %H:%M:%S"),
                colors.color(record.level()),
                record.target().magenta(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
