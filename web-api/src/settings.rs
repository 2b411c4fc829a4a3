use config::{Config, ConfigError, File};
use postgres::PsqlSettings;
use risk_core::RiskConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub api: ApiSettings,
    pub postgres: PsqlSettings,
    pub risk: Option<RiskSettings>,
    pub environment: Environment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub ip: String,
    pub port: u16,
    pub num_workers: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RiskSettings {
    pub risk_radius_km: Option<f64>,
    pub max_reports: Option<u32>,
    pub top_offenders_limit: Option<usize>,
    pub flagged_timestamps_cap: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Environment {
    Local,
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap()
            .try_into()
            .unwrap_or(Environment::Test);

        let settings: Settings = Config::builder()
            .add_source(
                File::with_name(&format!("config/{}", environment.as_str().to_lowercase()))
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("RISK_API").separator("__"))
            .set_override("environment", environment.as_str())?
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn risk_config(&self) -> RiskConfig {
        let risk = self.risk.unwrap_or_default();
        let defaults = RiskConfig::default();

        RiskConfig {
            risk_radius_km: risk.risk_radius_km.unwrap_or(defaults.risk_radius_km),
            max_reports: risk.max_reports.unwrap_or(defaults.max_reports),
            top_offenders_limit: risk
                .top_offenders_limit
                .unwrap_or(defaults.top_offenders_limit),
            flagged_timestamps_cap: risk
                .flagged_timestamps_cap
                .unwrap_or(defaults.flagged_timestamps_cap),
        }
    }
}

impl ApiSettings {
    pub fn listener_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "Local",
            Environment::Development => "Development",
            Environment::Production => "Production",
            Environment::Test => "Test",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(format!("'{value}' is not a valid environment")),
        }
    }
}

impl From<&LogLevel> for tracing::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
