use crate::error::{Result, ServerError};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "crop-balance-api")]
#[command(about = "Crop Supply-Demand Balance API")]
pub struct CliArgs {
    #[arg(long, help = "Interface to bind [default: 0.0.0.0]")]
    pub host: Option<String>,

    #[arg(long, help = "Port to listen on [default: 8000]")]
    pub port: Option<u16>,

    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ServerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective settings: CLI flags over the config file over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ServerConfig {
    pub fn load(args: &CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    pub fn resolve(args: &CliArgs, file: FileConfig) -> Result<Self> {
        let config = Self {
            host: args
                .host
                .clone()
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: args.port.or(file.server.port).unwrap_or(DEFAULT_PORT),
            verbose: args.verbose || file.logging.verbose.unwrap_or(false),
            json_logs: args.json_logs || file.logging.json.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::Config {
                message: "host must not be empty".to_string(),
            });
        }
        if self.port == 0 {
            return Err(ServerError::Config {
                message: "port must be between 1 and 65535".to_string(),
            });
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
