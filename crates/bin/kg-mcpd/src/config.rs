use clap::{Parser, builder::BoolishValueParser};
use kg_core::config::DEFAULT_BASE_URL;
use kg_core::{ClientConfig, Url};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "kg-mcpd", version, about = "Google Knowledge Graph MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "GOOGLE_KNOWLEDGE_GRAPH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "GOOGLE_CLOUD_API_KEY", hide_env_values = true)]
    cloud_api_key: Option<String>,

    #[arg(long, env = "KG_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: String,

    #[arg(
        long,
        env = "KG_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    request_timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "KG_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "KG_MCP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "KG_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone, Debug)]
pub struct KgConfig {
    pub client: ClientConfig,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl KgConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for KgConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let api_key = [args.api_key, args.cloud_api_key]
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSetting(
                "GOOGLE_KNOWLEDGE_GRAPH_API_KEY or GOOGLE_CLOUD_API_KEY",
            ))?;

        let base_url = Url::parse(args.api_base_url.trim()).map_err(|_| {
            ConfigError::InvalidSetting {
                name: "KG_API_BASE_URL",
                value: args.api_base_url.clone(),
            }
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidSetting {
                name: "KG_API_BASE_URL",
                value: args.api_base_url,
            });
        }

        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::InvalidSetting {
                name: "KG_ENABLE_STDIO/KG_MCP_SERVE",
                value: "no transport enabled".to_string(),
            });
        }

        let request_timeout = if args.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.request_timeout_secs))
        };

        let client = ClientConfig::new(api_key)
            .with_base_url(base_url)
            .with_request_timeout(request_timeout);

        Ok(Self {
            client,
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}
