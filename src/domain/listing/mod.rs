pub mod entity;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{Listing, ListingUpdate, NewListing};
pub use filter::{CompiledQuery, ListingPredicate, ReadPlan, SortDirection, SortKey, SortSpec};
pub use pagination::{PageMeta, PageWindow};
pub use query::{FilterValue, ListingQuery, SortOption};
pub use repository::ListingRepository;
pub use specifications::{IsListingOwnerSpec, OwnershipDecision};
pub use value_objects::{
    Category, Condition, ContactEmail, ListingDescription, ListingId, ListingImages,
    ListingStatus, ListingTitle, OwnerId, Price,
};
