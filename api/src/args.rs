use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser};
use nutrilens_core::domain::common::{
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, LLMConfig, NutriLensConfig, QuotaConfig,
    StagingConfig,
};

/// 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(name = "nutrilens-api", version, about = "NutriLens food image analysis API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub quota: QuotaArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8083)]
    pub port: u16,

    /// Prefix for every route, e.g. `/nutrilens`
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub allowed_origins: Vec<String>,

    /// Count quota against the first `X-Forwarded-For` address instead of
    /// the peer address.
    #[arg(long, env = "TRUST_PROXY")]
    pub trust_proxy: bool,

    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    #[arg(long, env = "TLS_CERT", requires = "tls_key")]
    pub tls_cert: Option<PathBuf>,

    #[arg(long, env = "TLS_KEY", requires = "tls_cert")]
    pub tls_key: Option<PathBuf>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    pub openai_model: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct QuotaArgs {
    #[arg(long = "quota-max-requests", env = "QUOTA_MAX_REQUESTS", default_value_t = 5)]
    pub max_requests: u32,

    #[arg(long = "quota-window-secs", env = "QUOTA_WINDOW_SECS", default_value_t = 86_400)]
    pub window_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StorageArgs {
    #[arg(long, env = "UPLOAD_DIR", default_value = "./uploads")]
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,

    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl From<Args> for NutriLensConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                openai_api_key: args.llm.openai_api_key,
                openai_model: args.llm.openai_model,
                openai_base_url: args.llm.openai_base_url,
            },
            quota: QuotaConfig {
                max_requests: args.quota.max_requests,
                window_secs: args.quota.window_secs,
            },
            storage: StagingConfig {
                upload_dir: args.storage.upload_dir,
            },
        }
    }
}
