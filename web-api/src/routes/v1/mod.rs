pub mod risk;
pub mod vessel;
