//! consult-intake binary entry point.
//!
//! `serve` (the default) runs the HTTP API; `chat` runs the interactive
//! console against the same configuration.

use std::net::AddrParseError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use consult_intake::adapters::ai::{
    ChatCompletionsConfig, ChatCompletionsGenerator, LlmReportGenerator, MockTextGenerator,
    ReportSettings,
};
use consult_intake::adapters::console::{run_console, ConsoleOptions};
use consult_intake::adapters::http::{app_router, IntakeHandlers};
use consult_intake::adapters::storage::{
    FileSessionStore, InMemorySessionStore, RemoteSessionStore,
};
use consult_intake::application::handlers::intake::{
    GenerationLimits, HandleTurnHandler, IntakeService, ReportTriggerHandler,
};
use consult_intake::config::{
    AiConfig, AiProvider, AppConfig, ConfigError, StorageBackend, StorageConfig, ValidationError,
};
use consult_intake::domain::foundation::SessionKey;
use consult_intake::domain::intake::{Role, Style};
use consult_intake::ports::{GenerationError, SessionStore, SessionStoreError, TextGenerator};

/// Conversational intake agent.
#[derive(Parser, Debug)]
#[command(name = "consult-intake", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API server.
    Serve,
    /// Run an interactive intake in the terminal.
    Chat {
        /// Session key to resume; a new one is generated when omitted.
        #[arg(long)]
        session: Option<String>,
        #[arg(long, default_value = "Auditor")]
        role: String,
        #[arg(long, default_value = "Formal")]
        style: String,
        #[arg(long, default_value_t = 0.7)]
        temperature: f32,
        /// Directory for saved reports; overrides `intake.report_output_dir`.
        #[arg(long)]
        report_dir: Option<PathBuf>,
        /// Generate and print the report when quitting with an exit word.
        #[arg(long)]
        report_on_exit: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("text generator: {0}")]
    Generator(#[from] GenerationError),

    #[error("session store: {0}")]
    Store(#[from] SessionStoreError),

    #[error("invalid bind address: {0}")]
    Address(#[from] AddrParseError),

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("consult-intake: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    let console = matches!(cli.command, Some(Commands::Chat { .. }));
    init_tracing(&config.server.log_level, config.is_production(), console);

    let service = Arc::new(build_service(&config)?);

    match cli.command {
        None | Some(Commands::Serve) => serve(&config, service).await,
        Some(Commands::Chat {
            session,
            role,
            style,
            temperature,
            report_dir,
            report_on_exit,
        }) => {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(StartupError::Argument(
                    "temperature must be between 0.0 and 2.0".to_string(),
                ));
            }
            let session_key = match session {
                Some(raw) => {
                    SessionKey::new(raw).map_err(|e| StartupError::Argument(e.to_string()))?
                }
                None => SessionKey::generate(),
            };
            let options = ConsoleOptions {
                session_key,
                role: Role::parse_lenient(&role),
                style: Style::parse_lenient(&style),
                temperature,
                report_output_dir: report_dir.or_else(|| config.intake.report_output_dir.clone()),
                report_on_exit,
            };
            run_console(
                service,
                options,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await?;
            Ok(())
        }
    }
}

async fn serve(config: &AppConfig, service: Arc<IntakeService>) -> Result<(), StartupError> {
    let addr = config.server.socket_addr()?;
    let handlers = IntakeHandlers::new(service, config.server.max_query_chars);
    let app = app_router(
        handlers,
        &config.server.cors_origins_list(),
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

fn build_service(config: &AppConfig) -> Result<IntakeService, StartupError> {
    let settings = Arc::new(config.intake.settings());
    let generator = build_generator(&config.ai)?;
    let store = build_store(&config.storage)?;

    let reports = LlmReportGenerator::new(
        generator.clone(),
        ReportSettings {
            start_phrase: settings.start_phrase.clone(),
            max_input_chars: config.ai.report_max_input_chars,
            max_output_tokens: config.ai.report_max_output_tokens,
            temperature: config.ai.report_temperature,
            timeout: config.ai.report_timeout(),
        },
    );
    let trigger = Arc::new(ReportTriggerHandler::new(
        Arc::new(reports),
        settings.report_completion,
        config.ai.report_timeout() + Duration::from_secs(2),
    ));
    let controller = HandleTurnHandler::new(
        generator,
        trigger,
        settings,
        GenerationLimits {
            max_output_tokens: config.ai.max_output_tokens,
            timeout: config.ai.timeout(),
        },
    );

    tracing::info!(
        provider = ?config.ai.provider,
        storage = ?config.storage.backend,
        "Intake service ready"
    );
    Ok(IntakeService::new(store, controller))
}

fn build_generator(ai: &AiConfig) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    let api_key = ai.api_key.clone().unwrap_or_default();
    let mut config = match ai.provider {
        AiProvider::Mock => return Ok(Arc::new(MockTextGenerator::new())),
        AiProvider::Groq => ChatCompletionsConfig::groq(api_key),
        AiProvider::OpenAI => ChatCompletionsConfig::openai(api_key),
    };
    if let Some(model) = &ai.model {
        config = config.with_model(model.clone());
    }
    if let Some(url) = &ai.base_url {
        config = config.with_base_url(url.clone());
    }
    Ok(Arc::new(ChatCompletionsGenerator::new(config)?))
}

fn build_store(storage: &StorageConfig) -> Result<Arc<dyn SessionStore>, StartupError> {
    let store: Arc<dyn SessionStore> = match storage.backend {
        StorageBackend::File => Arc::new(FileSessionStore::new(&storage.path, storage.format)),
        StorageBackend::Memory => Arc::new(InMemorySessionStore::new()),
        StorageBackend::Remote => {
            let url = storage
                .remote_url
                .clone()
                .ok_or(ConfigError::from(ValidationError::MissingRequired(
                    "storage.remote_url",
                )))?;
            Arc::new(RemoteSessionStore::new(
                url,
                storage.remote_token.clone(),
                storage.remote_timeout(),
            )?)
        }
    };
    Ok(store)
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter. The console writes logs to
/// stderr so they do not interleave with the dialogue.
fn init_tracing(log_level: &str, json: bool, console: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json && !console {
        builder.json().init();
    } else {
        builder.init();
    }
}
