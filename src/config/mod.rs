pub mod toml_config;

use crate::adapters::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use crate::adapters::supabase::DEFAULT_REPORTS_TABLE;
use crate::adapters::whois::DEFAULT_WHOIS_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::validate_required_field;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, warn_if_missing, Validate,
};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "trustmona")]
#[command(about = "Scam-risk scoring relay for links and messages")]
pub struct CliConfig {
    #[arg(long, help = "Load settings from a TOML file instead of flags/env")]
    pub config: Option<std::path::PathBuf>,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    pub openai_model: String,

    #[arg(long, env = "WHOIS_API_KEY", hide_env_values = true)]
    pub whois_api_key: Option<String>,

    #[arg(long, env = "WHOIS_ENDPOINT", default_value = DEFAULT_WHOIS_ENDPOINT)]
    pub whois_endpoint: String,

    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: Option<String>,

    #[arg(long, env = "SUPABASE_TABLE", default_value = DEFAULT_REPORTS_TABLE)]
    pub supabase_table: String,

    #[arg(long, env = "REQUEST_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub request_timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "LOG_JSON", help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn port(&self) -> u16 {
        self.port
    }

    fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }

    fn openai_base_url(&self) -> &str {
        &self.openai_base_url
    }

    fn openai_model(&self) -> &str {
        &self.openai_model
    }

    fn whois_api_key(&self) -> Option<&str> {
        self.whois_api_key.as_deref()
    }

    fn whois_endpoint(&self) -> &str {
        &self.whois_endpoint
    }

    fn supabase_url(&self) -> &str {
        self.supabase_url.as_deref().unwrap_or_default()
    }

    fn supabase_key(&self) -> Option<&str> {
        self.supabase_anon_key.as_deref()
    }

    fn supabase_table(&self) -> &str {
        &self.supabase_table
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_required_field("SUPABASE_URL", &self.supabase_url)?;
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider(config: &dyn ConfigProvider) -> Result<()> {
    validate_range("port", config.port(), 1, u16::MAX)?;
    validate_url("openai_base_url", config.openai_base_url())?;
    validate_non_empty_string("openai_model", config.openai_model())?;
    validate_url("whois_endpoint", config.whois_endpoint())?;
    validate_url("supabase_url", config.supabase_url())?;
    validate_non_empty_string("supabase_table", config.supabase_table())?;
    validate_range(
        "request_timeout_seconds",
        config.request_timeout_seconds(),
        1,
        MAX_TIMEOUT_SECONDS,
    )?;

    warn_if_missing("OPENAI_API_KEY", config.openai_api_key());
    warn_if_missing("WHOIS_API_KEY", config.whois_api_key());
    warn_if_missing("SUPABASE_ANON_KEY", config.supabase_key());

    tracing::info!("✅ Configuration validation passed");
    Ok(())
}
