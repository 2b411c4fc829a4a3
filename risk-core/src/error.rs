use snafu::{Location, Snafu};

pub type CoreResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("the position store is unavailable: {message}"))]
    StoreUnavailable {
        #[snafu(implicit)]
        location: Location,
        message: String,
    },
    #[snafu(display("'{value}' is not a valid vessel identifier"))]
    InvalidIdentifier {
        #[snafu(implicit)]
        location: Location,
        value: String,
    },
}
