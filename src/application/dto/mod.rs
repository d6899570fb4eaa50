pub mod auth;
pub mod listings;
pub mod pagination;
pub mod serde_time;

pub use auth::AuthenticatedIdentity;
pub use listings::{AppliedFiltersDto, ListingDto, ListingPageDto};
pub use pagination::PaginationDto;
