mod position;
mod risk;

pub use position::*;
pub use risk::*;
