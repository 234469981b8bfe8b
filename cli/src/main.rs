//! CLI entrypoint for llm-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use council_application::{DeliberationParams, RunDeliberationInput, RunDeliberationUseCase};
use council_domain::{Model, RoleAssignment};
use council_infrastructure::{
    AnthropicAdapter, ConfigLoader, FileConfig, JsonlDeliberationLogger, OllamaAdapter,
    OpenAiAdapter, RoutingGateway,
    providers::ProviderAdapter,
};
use council_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level. At -vv and above, logs
    // also go to a daily file so trace output survives the progress bars.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let _log_guard = if cli.verbose >= 2
        && let Some(log_dir) = dirs::data_dir().map(|d| d.join("llm-council").join("logs"))
    {
        let appender = tracing_appender::rolling::daily(log_dir, "llm-council.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        None
    };

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    config.validate()?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting llm-council");

    // === Dependency Injection ===
    let gateway = Arc::new(build_gateway(&config));
    let assignment = build_assignment(&cli, &config)?;
    let params = build_params(&cli, &config);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(gateway, assignment)
            .with_progress(!cli.quiet && config.repl.show_progress)
            .with_params(params);
        if let Some(ref path) = config.repl.history_file {
            repl = repl.with_history_file(path.into());
        }

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    // Ctrl-C aborts the run; in-flight provider calls are dropped.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                 llm-council - LLM Council                  |");
        println!("+============================================================+");
        println!();
        println!("Question: {}", question);
        println!("Mode: {}", assignment.mode());
        for (role, model) in assignment.seats() {
            println!("  {} - {}", role, model);
        }
        println!();
    }

    let query = match council_domain::Query::try_new(question) {
        Some(q) => q,
        None => bail!("Question cannot be empty."),
    };

    let audit_log = config
        .log
        .deliberation_log
        .as_ref()
        .and_then(JsonlDeliberationLogger::new);

    let input = RunDeliberationInput::new(query.clone(), assignment)
        .with_params(params)
        .with_cancellation(cancel);

    let use_case = RunDeliberationUseCase::new(gateway);

    let result = if cli.quiet {
        use_case.execute(input).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(ref log) = audit_log {
                log.log_failure(&query, &e);
            }
            return Err(e.into());
        }
    };

    if let Some(ref log) = audit_log {
        log.log_outcome(&query, &outcome);
    }

    let format = cli.output.unwrap_or_else(|| match config.output.format.as_deref() {
        Some("full") => OutputFormat::Full,
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Answer,
    });

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Answer => ConsoleFormatter::format_answer_only(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };

    println!("{}", output);

    Ok(())
}

/// Build the provider stack from config plus API keys in the environment.
///
/// Ollama is always available; remote providers are added only when their
/// key is present so the routing fallback never selects a dead adapter.
fn build_gateway(config: &FileConfig) -> RoutingGateway {
    let mut adapters: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

    let ollama = match &config.providers.ollama.base_url {
        Some(url) => OllamaAdapter::with_base_url(url),
        None => OllamaAdapter::new(),
    };
    adapters.push(Arc::new(ollama));

    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        adapters.push(Arc::new(OpenAiAdapter::new(key)));
    }
    if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
        adapters.push(Arc::new(AnthropicAdapter::new(key)));
    }
    if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
        adapters.push(Arc::new(OpenAiAdapter::openrouter(key)));
    }

    RoutingGateway::new(adapters, &config.providers)
}

/// Resolve the role assignment: CLI flags beat the config file, which
/// beats the built-in defaults.
fn build_assignment(cli: &Cli, config: &FileConfig) -> Result<RoleAssignment> {
    let mode = match &cli.mode {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => config.council.parse_mode()?,
    };

    let chairman = cli
        .chairman
        .as_ref()
        .map(|s| s.parse().unwrap())
        .or_else(|| config.council.chairman.clone())
        .unwrap_or_else(Model::default_chairman);

    let assignment = match mode {
        council_domain::DeliberationMode::Classic => {
            let members: Vec<Model> = if !cli.member.is_empty() {
                cli.member.iter().map(|s| s.parse().unwrap()).collect()
            } else if !config.council.members.is_empty() {
                config.council.member_models()
            } else {
                Model::default_members()
            };
            RoleAssignment::classic(members, chairman)
        }
        council_domain::DeliberationMode::Debate => {
            let defaults = Model::default_members();
            let proponent = cli
                .proponent
                .as_ref()
                .map(|s| s.parse().unwrap())
                .or_else(|| config.council.proponent.clone())
                .unwrap_or_else(|| defaults[0].clone());
            let opponent = cli
                .opponent
                .as_ref()
                .map(|s| s.parse().unwrap())
                .or_else(|| config.council.opponent.clone())
                .unwrap_or_else(|| defaults[1].clone());
            RoleAssignment::debate(proponent, opponent, chairman)
        }
    };

    Ok(assignment)
}

/// Resolve per-run parameters from CLI flags and the config file.
fn build_params(cli: &Cli, config: &FileConfig) -> DeliberationParams {
    let mut params = DeliberationParams::default().with_sampling(config.behavior.sampling());

    let timeout = cli.timeout.or(config.behavior.timeout_seconds);
    if let Some(seconds) = timeout {
        params = params.with_call_timeout(Duration::from_secs(seconds));
    }

    params
}
