use crate::adapters::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use crate::adapters::supabase::DEFAULT_REPORTS_TABLE;
use crate::adapters::whois::DEFAULT_WHOIS_ENDPOINT;
use crate::config::{validate_provider, DEFAULT_PORT, DEFAULT_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TrustError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub whois: WhoisSection,
    pub persistence: PersistenceSection,
    #[serde(default)]
    pub http: HttpSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    pub api_key: Option<String>,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoisSection {
    pub api_key: Option<String>,
    #[serde(default = "default_whois_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistenceSection {
    pub url: String,
    pub anon_key: Option<String>,
    #[serde(default = "default_reports_table")]
    pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSection {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_whois_endpoint() -> String {
    DEFAULT_WHOIS_ENDPOINT.to_string()
}

fn default_reports_table() -> String {
    DEFAULT_REPORTS_TABLE.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_openai_model(),
        }
    }
}

impl Default for WhoisSection {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_whois_endpoint(),
        }
    }
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// A `${VAR}` left unresolved means the variable was not set.
fn resolved(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty() && !ENV_VAR_RE.is_match(v))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrustError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TrustError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPENAI_API_KEY})
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json
    }
}

impl ConfigProvider for TomlConfig {
    fn port(&self) -> u16 {
        self.server.port
    }

    fn openai_api_key(&self) -> Option<&str> {
        resolved(&self.model.api_key)
    }

    fn openai_base_url(&self) -> &str {
        &self.model.base_url
    }

    fn openai_model(&self) -> &str {
        &self.model.model
    }

    fn whois_api_key(&self) -> Option<&str> {
        resolved(&self.whois.api_key)
    }

    fn whois_endpoint(&self) -> &str {
        &self.whois.endpoint
    }

    fn supabase_url(&self) -> &str {
        &self.persistence.url
    }

    fn supabase_key(&self) -> Option<&str> {
        resolved(&self.persistence.anon_key)
    }

    fn supabase_table(&self) -> &str {
        &self.persistence.table
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.http.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
