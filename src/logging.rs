//! # 日志初始化
//!
//! 根据命令行的 `-v` / `-q` 选项设置 `simple_logger` 的日志级别。

use log::{LevelFilter, debug};
use simple_logger::SimpleLogger;

/// 将 `-v` 次数与 `-q` 选项映射为日志级别。
///
/// 默认只输出警告，`-v` 为 Info，`-vv` 为 Debug，更多则为 Trace。
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// 初始化全局日志器。重复初始化时保留已有的日志器。
pub fn setup_logger(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);

    if SimpleLogger::new().with_level(level).init().is_ok() {
        debug!("Initialized logger at level {level}");
    }
}
