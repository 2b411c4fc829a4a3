use serde::Deserialize;

/// Connection settings for the position store, passed to the adapter at
/// construction time.
#[derive(Clone, Debug, Deserialize)]
pub struct PsqlSettings {
    pub ip: String,
    pub port: u16,
    pub db_name: Option<String>,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
    pub root_cert: Option<String>,
    #[serde(default)]
    pub log_statements: PsqlLogStatements,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub enum PsqlLogStatements {
    Enable,
    #[default]
    Disable,
}
