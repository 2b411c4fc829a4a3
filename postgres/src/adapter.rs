use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use risk_core::{CoreResult, PositionReport, PositionStore, VesselIdentifier};
use snafu::ResultExt;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
    ConnectOptions, PgPool,
};

use crate::{
    error::{ConnectionSnafu, MigrationSnafu, Result},
    settings::{PsqlLogStatements, PsqlSettings},
};

#[derive(Debug, Clone)]
pub struct PostgresAdapter {
    pub(crate) pool: PgPool,
}

impl PostgresAdapter {
    pub async fn new(settings: &PsqlSettings) -> Result<PostgresAdapter> {
        let mut opts = PgConnectOptions::new()
            .username(&settings.username)
            .password(&settings.password)
            .host(&settings.ip)
            .port(settings.port);

        if let Some(db_name) = &settings.db_name {
            opts = opts.database(db_name);
        }

        if let Some(root_cert_path) = &settings.root_cert {
            opts = opts
                .ssl_root_cert(root_cert_path)
                .ssl_mode(PgSslMode::VerifyFull);
        }

        match settings.log_statements {
            PsqlLogStatements::Enable => (),
            PsqlLogStatements::Disable => {
                opts = opts.disable_statement_logging();
            }
        }

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .connect_with(opts)
            .await
            .context(ConnectionSnafu)?;

        Ok(PostgresAdapter { pool })
    }

    pub async fn do_migrations(&self) -> Result<()> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .context(MigrationSnafu)
    }
}

#[async_trait]
impl PositionStore for PostgresAdapter {
    async fn fetch_vessel_history(
        &self,
        vessel: &VesselIdentifier,
        max_reports: u32,
    ) -> CoreResult<Vec<PositionReport>> {
        Ok(self.fetch_vessel_history_impl(vessel, max_reports).await?)
    }

    async fn fetch_companions(
        &self,
        timestamps: &BTreeSet<DateTime<Utc>>,
        exclude: &VesselIdentifier,
    ) -> CoreResult<Vec<PositionReport>> {
        Ok(self.fetch_companions_impl(timestamps, exclude).await?)
    }

    async fn fetch_report_at(
        &self,
        vessel: &VesselIdentifier,
        timestamp: DateTime<Utc>,
    ) -> CoreResult<Option<PositionReport>> {
        Ok(self.fetch_report_at_impl(vessel, timestamp).await?)
    }
}
