//! pdf-toolkit - merge, split and extract pages from PDF files.

use clap::Parser;
use env_logger::Env;
use std::process;

use pdf_toolkit::cli::Cli;
use pdf_toolkit::config::LOG_ENV_VAR;
use pdf_toolkit::output::OutputFormatter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV_VAR, cli.default_log_filter()))
        .format_timestamp(None)
        .init();

    let out = OutputFormatter::new(cli.quiet, cli.verbose);

    if let Err(err) = pdf_toolkit::run(&cli, &out).await {
        log::error!("{:?} failed: {err}", cli.command);
        out.error(&err.to_string());
        process::exit(err.exit_code());
    }
}
