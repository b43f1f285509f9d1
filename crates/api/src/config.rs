/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite connection string (default: `sqlite:fixtrack.db`).
    pub database_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory where uploaded attachments are stored.
    pub upload_dir: String,
    /// Lowercased file extensions accepted for attachments.
    pub upload_allowed_exts: Vec<String>,
    /// Maximum request body size in bytes (default: 50 MiB).
    pub upload_max_bytes: usize,
    /// Repair-time estimation backend configuration.
    pub llm: LlmConfig,
}

/// Configuration for the chat-completion estimation backend.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Whether to call the backend at all (default: `false`).
    pub enabled: bool,
    /// API key; estimation stays heuristic-only when empty.
    pub api_key: String,
    /// Model name sent with each completion request.
    pub model: String,
    /// Base URL of the chat-completions API.
    pub base_url: String,
    /// Outbound request timeout in seconds (default: `20`).
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `3000`                      |
    /// | `DATABASE_URL`         | `sqlite:fixtrack.db`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `UPLOAD_DIR`           | `storage/uploads`           |
    /// | `UPLOAD_ALLOWED_EXTS`  | `png,jpg,jpeg,gif,mp4,mov,avi` |
    /// | `UPLOAD_MAX_BYTES`     | `52428800`                  |
    /// | `LLM_ENABLED`          | `false`                     |
    /// | `OPENAI_API_KEY`       | (empty)                     |
    /// | `LLM_MODEL`            | `gpt-4o`                    |
    /// | `LLM_BASE_URL`         | `https://api.openai.com/v1` |
    /// | `LLM_TIMEOUT_SECS`     | `20`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:fixtrack.db".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir =
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "storage/uploads".into());

        let upload_allowed_exts: Vec<String> = std::env::var("UPLOAD_ALLOWED_EXTS")
            .unwrap_or_else(|_| fixtrack_core::upload::DEFAULT_ALLOWED_EXTENSIONS.join(","))
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let upload_max_bytes: usize = std::env::var("UPLOAD_MAX_BYTES")
            .unwrap_or_else(|_| "52428800".into())
            .parse()
            .expect("UPLOAD_MAX_BYTES must be a valid usize");

        let llm = LlmConfig::from_env();

        Self {
            host,
            port,
            database_url,
            request_timeout_secs,
            upload_dir,
            upload_allowed_exts,
            upload_max_bytes,
            llm,
        }
    }
}

impl LlmConfig {
    /// Load the estimation backend configuration from environment variables.
    pub fn from_env() -> Self {
        let enabled = std::env::var("LLM_ENABLED")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o".into());

        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());

        let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Self {
            enabled,
            api_key,
            model,
            base_url,
            timeout_secs,
        }
    }
}
