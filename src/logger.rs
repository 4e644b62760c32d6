use anyhow::Result;
use log::{Level, LevelFilter};
use simple_logger::SimpleLogger;

pub fn init(level: Level) -> Result<()> {
    SimpleLogger::new()
        .with_level(level.to_level_filter())
        .with_module_level("hyper", LevelFilter::Warn)
        .with_module_level("reqwest", LevelFilter::Warn)
        .init()?;

    Ok(())
}
