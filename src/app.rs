use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{self, Config};
use crate::hydraulics;
use crate::i18n::{self, Translator};
use crate::input::{InputError, Scenario};
use crate::presets::{BoilerCatalog, CatalogError};
use crate::report::{self, ReportContext};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] config::ConfigError),
    /// 시나리오 입력 오류
    #[error("입력 오류: {0}")]
    Input(#[from] InputError),
    /// 보일러 카탈로그 오류
    #[error("카탈로그 오류: {0}")]
    Catalog(#[from] CatalogError),
    /// 결과 직렬화 오류
    #[error("결과 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Toml,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Checks whether a boiler's built-in pump can feed radiators and a mixed UFH loop without a separator")]
pub struct Cli {
    /// 언어 (auto/en/ko/ru)
    #[arg(long, short = 'L', default_value = "auto")]
    pub lang: String,
    /// 설정 파일 경로
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// 사용자 보일러 카탈로그(TOML)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// 디버그 로그 출력
    #[arg(long, short)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 시나리오 파일을 분석한다
    Analyze {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// 보일러 프리셋 카탈로그를 출력한다
    Presets,
}

/// 실행 중 공유하는 설정/번역기/카탈로그.
pub struct Session {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub tr: Translator,
    pub catalog: BoilerCatalog,
}

impl Session {
    pub fn open(cli: &Cli) -> Result<Self, AppError> {
        let config = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_default()?,
        };
        let lang = i18n::resolve_language(&cli.lang, Some(config.language.as_str()));
        let catalog_path = cli.catalog.as_ref().or(config.catalog_path.as_ref());
        let catalog = match catalog_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading boiler catalog");
                BoilerCatalog::load(path)?
            }
            None => BoilerCatalog::built_in(),
        };
        Ok(Self {
            config,
            config_path: cli.config.clone(),
            tr: Translator::new_with_pack(&lang, Some("locales")),
            catalog,
        })
    }

    /// 언어 설정이 바뀌었을 때 번역기를 다시 만든다.
    pub fn reload_translator(&mut self) {
        let lang = i18n::resolve_language("auto", Some(self.config.language.as_str()));
        self.tr = Translator::new_with_pack(&lang, Some("locales"));
    }

    pub fn save_config(&self) -> Result<(), AppError> {
        match &self.config_path {
            Some(path) => self.config.save_to(path)?,
            None => self.config.save()?,
        }
        Ok(())
    }

    /// 시나리오 파일을 읽어 분석하고 보고서 문자열을 돌려준다.
    pub fn analyze_file(&self, path: &Path, format: OutputFormat) -> Result<String, AppError> {
        let scenario = Scenario::load(path)?;
        tracing::info!(path = %path.display(), "analysing scenario");
        self.analyze_scenario(&scenario, format)
    }

    pub fn analyze_scenario(
        &self,
        scenario: &Scenario,
        format: OutputFormat,
    ) -> Result<String, AppError> {
        let inputs = scenario.resolve(&self.catalog)?;
        let result = hydraulics::analyze_system(&inputs);
        match format {
            OutputFormat::Text => {
                let ctx = ReportContext {
                    catalog: &self.catalog,
                    selection: scenario.preset.as_ref(),
                    units: self.config.default_units,
                };
                Ok(report::render_report(&result, &inputs, &ctx, &self.tr))
            }
            OutputFormat::Toml => Ok(toml::to_string_pretty(&result)?),
        }
    }
}

/// 오류 메시지용 번역기. CLI 언어, 저장된 설정의 언어, 시스템 로케일 순으로 고른다.
pub fn error_translator(cli_lang: &str, config_path: Option<&Path>) -> Translator {
    let config_lang = config::read_existing(config_path).map(|c| c.language);
    Translator::new(&i18n::resolve_language(cli_lang, config_lang.as_deref()))
}

/// CLI 진입 후 하위 명령 또는 대화형 메뉴를 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let mut session = Session::open(&cli)?;
    match cli.command {
        Some(Command::Analyze { file, format }) => {
            println!("{}", session.analyze_file(&file, format)?);
        }
        Some(Command::Presets) => ui_cli::print_presets(&session),
        None => run_interactive(&mut session)?,
    }
    Ok(())
}

/// 대화형 메뉴 루프.
pub fn run_interactive(session: &mut Session) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(&session.tr)? {
            MenuChoice::AnalyzeFile => ui_cli::handle_analyze_file(session)?,
            MenuChoice::ManualEntry => ui_cli::handle_manual_entry(session)?,
            MenuChoice::Presets => ui_cli::print_presets(session),
            MenuChoice::Settings => {
                ui_cli::handle_settings(session)?;
                session.save_config()?;
            }
            MenuChoice::Exit => {
                println!("{}", session.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
