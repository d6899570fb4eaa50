pub mod errors;
pub mod listing;
