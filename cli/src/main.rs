use std::io::Write as _;

use clap::Parser;
use colored::Colorize as _;
use hoist_cli::cmd::GlobalArgs;
use hoist_core::style::ColorTheme as _;

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let level = record.level();
            writeln!(
                buf,
                "{} {}",
                format!("[{}]", level).color(level.color()),
                record.args()
            )
        })
        .init();
}

fn main() {
    init_logger();
    let app = GlobalArgs::parse();
    app.exec_subcmd().unwrap_or_else(|e| {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    });
}
