//! 日志初始化
//!
//! 终端处于原始模式和交替屏幕时 stderr 不可用，日志写入文件。
//! 日志级别由 `RUST_LOG` 控制，默认 `info`。

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Context;

pub fn init_logging(log_file: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to install logger")?;
    Ok(())
}
