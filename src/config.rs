use crate::deeplink::DeepLinkTarget;
use crate::ui::Card;
use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

/// Config file picked up from the search directory when no path is given.
const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,

    /// Log output format (text or json)
    #[arg(long, env = "LOG_FORMAT")]
    pub log_format: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub resilience: ResilienceConfig,
    pub messaging: MessagingConfig,
    pub popup: PopupConfig,
    pub logging: LoggingConfig,
    #[serde(default = "default_cards")]
    pub cards: Vec<Card>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub site_name: String,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub timeout_disabled: bool,
    pub timeout_secs: u64,
    pub body_limit_bytes: usize,
}

/// Messaging service and the two numbers that receive leads and orders.
#[derive(Debug, Deserialize, Clone)]
pub struct MessagingConfig {
    pub base_url: String,
    /// Receives popup leads.
    pub popup_recipient: String,
    /// Receives cart summaries.
    pub cart_recipient: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PopupConfig {
    pub heading: String,
    pub image_path: String,
    pub idle_timeout_secs: u64,
    pub prune_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub filter: String,
}

fn default_cards() -> Vec<Card> {
    [
        ("Sofas", "Three-seaters and sectionals in linen and leather", "sofas"),
        ("Beds", "Solid wood king and queen beds with storage", "beds"),
        ("Dining", "Tables and chairs for four to eight", "dining"),
    ]
    .into_iter()
    .map(|(title, paragraph, slug)| Card {
        image: format!("/static/cards/{slug}.jpg"),
        title: title.to_string(),
        paragraph: paragraph.to_string(),
        link: format!("/collections/{slug}"),
    })
    .collect()
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Load from CLI arguments, looking for `config.yaml` in the working directory.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::load_from_args_in(args, Path::new("."))
    }

    /// Load from CLI arguments, looking for `config.yaml` in `search_dir`.
    pub fn load_from_args_in<I, T>(args: I, search_dir: &Path) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.site_name", "Bedwood Furnitures")?
            .set_default("server.static_dir", "static")?
            .set_default("resilience.timeout_disabled", false)?
            .set_default("resilience.timeout_secs", 30)?
            .set_default("resilience.body_limit_bytes", 64 * 1024)?
            .set_default("messaging.base_url", "https://wa.me/")?
            .set_default("messaging.popup_recipient", "+919675111719")?
            .set_default("messaging.cart_recipient", "8630715936")?
            .set_default("popup.heading", "Welcome To Bedwood Furnitures")?
            .set_default("popup.image_path", "/static/popup.png")?
            .set_default("popup.idle_timeout_secs", 30 * 60)?
            .set_default("popup.prune_interval_secs", 60)?
            .set_default("logging.format", "text")?
            .set_default("logging.filter", "info")?;

        // 2. Config file: explicit path must exist, <search_dir>/config.yaml is optional
        let fallback = search_dir.join(CONFIG_FILE_NAME);
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path).required(true));
        } else if fallback.is_file() {
            builder = builder.add_source(File::from(fallback).format(FileFormat::Yaml));
        }

        // 3. Environment variables prefixed with BEDWOOD_, e.g. BEDWOOD_SERVER__PORT=8000.
        // Values stay strings so recipients like "+91..." keep their sign.
        builder = builder.add_source(
            Environment::with_prefix("BEDWOOD")
                .prefix_separator("_")
                .separator("__"),
        );

        // 4. CLI flags (and their plain env fallbacks) win
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }
        if let Some(format) = cli.log_format {
            builder = builder.set_override("logging.format", format)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject messaging settings that cannot form a deep link.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.popup_target()?;
        self.cart_target()?;
        Ok(())
    }

    /// Deep link target for popup leads.
    pub fn popup_target(&self) -> Result<DeepLinkTarget, config::ConfigError> {
        DeepLinkTarget::new(&self.messaging.base_url, &self.messaging.popup_recipient)
            .map_err(|e| config::ConfigError::Message(format!("messaging.popup_recipient: {e}")))
    }

    /// Deep link target for cart summaries.
    pub fn cart_target(&self) -> Result<DeepLinkTarget, config::ConfigError> {
        DeepLinkTarget::new(&self.messaging.base_url, &self.messaging.cart_recipient)
            .map_err(|e| config::ConfigError::Message(format!("messaging.cart_recipient: {e}")))
    }
}
