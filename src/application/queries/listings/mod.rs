// src/application/queries/listings/mod.rs
mod get_by_id;
mod list;
mod own;
mod read;
mod service;

pub use get_by_id::GetListingQuery;
pub use list::ListListingsQuery;
pub use own::ListOwnListingsQuery;
pub use service::ListingQueryService;
