use crate::domain::errors::DomainResult;
use crate::domain::listing::{
    entity::{Listing, ListingUpdate, NewListing},
    filter::{ListingPredicate, SortSpec},
    pagination::PageWindow,
    value_objects::ListingId,
};
use async_trait::async_trait;

/// Single gateway to the listing store. Implementations translate the
/// predicate, sort and window into storage calls and perform no business-rule
/// interpretation of their own.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn create(&self, listing: NewListing) -> DomainResult<Listing>;
    async fn find_by_id(&self, id: ListingId) -> DomainResult<Option<Listing>>;
    /// Returns one ordered page plus the count of all matching records.
    async fn find_many(
        &self,
        predicate: &ListingPredicate,
        sort: SortSpec,
        window: PageWindow,
    ) -> DomainResult<(Vec<Listing>, u64)>;
    /// Returns up to `limit` matching records chosen uniformly at random plus
    /// the count of all matching records.
    async fn sample_many(
        &self,
        predicate: &ListingPredicate,
        limit: u32,
    ) -> DomainResult<(Vec<Listing>, u64)>;
    async fn update_by_id(&self, update: ListingUpdate) -> DomainResult<Listing>;
    async fn delete_by_id(&self, id: ListingId) -> DomainResult<()>;
}
