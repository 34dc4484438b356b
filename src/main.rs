use clap::Parser;

use text_pixels::{
    cli::{Cli, Commands},
    handler::{handle_decode, handle_encode},
    logging::setup_logger,
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令（`encode` 或 `decode`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();
    setup_logger(cli.verbose, cli.quiet);

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Encode(args) => handle_encode(args).map(|_| ()),
        Commands::Decode(args) => handle_decode(args).map(|_| ()),
    }
}
