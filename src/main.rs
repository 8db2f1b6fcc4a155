use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use boiler_pump_check::app::{self, Cli};
use boiler_pump_check::i18n::keys;

/// 프로그램의 엔트리 포인트. 로그를 초기화한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let lang = cli.lang.clone();
    let config_path = cli.config.clone();
    match app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let tr = app::error_translator(&lang, config_path.as_deref());
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
