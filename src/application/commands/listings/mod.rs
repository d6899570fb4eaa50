// src/application/commands/listings/mod.rs
mod create;
mod delete;
mod ownership;
mod service;
mod update;

pub use create::CreateListingCommand;
pub use delete::DeleteListingCommand;
pub use service::ListingCommandService;
pub use update::UpdateListingCommand;
