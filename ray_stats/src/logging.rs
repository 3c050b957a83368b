use std::path::Path;

/// Routes `log` output to stdout and optionally to `log_path`.
///
/// Hosts that already install their own logger don't need this, the diagnostics use
/// the `ray_stats` target.
pub fn setup_logger(
    level: log::LevelFilter,
    log_path: Option<&Path>,
) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}:{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());
    if let Some(path) = log_path {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }
    dispatch.apply()?;
    Ok(())
}
