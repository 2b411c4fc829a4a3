#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod distance;
mod domain;
mod engine;
mod error;
mod ports;

#[cfg(any(test, feature = "test"))]
pub mod test_helper;

pub use distance::*;
pub use domain::*;
pub use engine::*;
pub use error::*;
pub use ports::*;
