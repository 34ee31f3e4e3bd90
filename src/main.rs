use clap::Parser;
use trustmona::core::ConfigProvider;
use trustmona::utils::error::{ErrorSeverity, TrustError};
use trustmona::utils::{logger, validation::Validate};
use trustmona::{CliConfig, TomlConfig};

fn exit_with(e: &TrustError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // A config file replaces flag/env settings wholesale.
    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Could not load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(TomlConfig::verbose);
    let json_logs = cli.json_logs || file_config.as_ref().is_some_and(TomlConfig::json_logs);
    logger::init_logger(verbose, json_logs);

    tracing::info!("Starting TrustMona");

    let validation = match &file_config {
        Some(config) => config.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        exit_with(&e);
    }

    let config: &dyn ConfigProvider = match &file_config {
        Some(config) => config,
        None => &cli,
    };
    tracing::debug!(
        "Model {} at {}, reports table {}, timeout {}s",
        config.openai_model(),
        config.openai_base_url(),
        config.supabase_table(),
        config.request_timeout_seconds()
    );

    trustmona::run_with_config(config).await
}
