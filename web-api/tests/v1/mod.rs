pub mod helper;
pub mod risk;
pub mod vessel;
