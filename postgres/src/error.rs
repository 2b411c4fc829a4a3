use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("failed to establish a database connection"))]
    Connection {
        #[snafu(implicit)]
        location: Location,
        source: sqlx::Error,
    },
    #[snafu(display("a query related error occured"))]
    Query {
        #[snafu(implicit)]
        location: Location,
        source: sqlx::Error,
    },
    #[snafu(display("failed to run database migrations"))]
    Migration {
        #[snafu(implicit)]
        location: Location,
        source: sqlx::migrate::MigrateError,
    },
}

impl From<Error> for risk_core::Error {
    fn from(value: Error) -> Self {
        let mut message = value.to_string();
        let mut source = std::error::Error::source(&value);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        risk_core::StoreUnavailableSnafu { message }.build()
    }
}
