use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use scopeguard::defer;
use std::io;

use error::handle_error;
use rooms::RoomCatalog;
use sensory_portrait::{
    app_loop::PortraitLoop,
    clock::SystemClock,
    config::CliArgs,
    input::ConsoleInput,
    logging::init_logging,
    portrait::Portrait,
    renderer::{NO_DATA_NOTICE, RatatuiRenderer},
};

fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();
    let config = cli.resolve().context("Failed to load config")?;

    init_logging(&config.log_file)?;
    log::info!("Starting with {:?}", config);

    // 加载失败只记录日志，界面显示提示
    let (catalog, notice) = match RoomCatalog::load(&config.data_path) {
        Ok(catalog) => (catalog, NO_DATA_NOTICE.to_string()),
        Err(e) => {
            // 数据本身的问题只是警告，文件系统错误记为错误
            if e.is_data_error() {
                log::warn!("Unusable data in {}: {}", config.data_path.display(), e);
            } else {
                log::error!("Failed to read {}: {}", config.data_path.display(), e);
            }
            (RoomCatalog::default(), handle_error(&e))
        }
    };

    enable_raw_mode().context("Failed to enable raw mode")?;
    defer! {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let renderer = RatatuiRenderer::stdout()?.with_notice(notice);
    let portrait = Portrait::new(catalog, &config);
    let clock = SystemClock::new(config.frame_rate);

    let mut app = PortraitLoop::new(portrait, renderer, ConsoleInput::new(), clock);
    let result = app.run();
    if let Err(e) = &result {
        log::error!("Portrait loop failed: {:#}", e);
    }
    result
}
