// src/infrastructure/repositories/memory_listing.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::listing::{
    Listing, ListingId, ListingPredicate, ListingRepository, ListingUpdate, NewListing,
    PageWindow, SortSpec,
};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local listing store for development and tests. Reads share the
/// lock; writes are serialized.
#[derive(Clone, Default)]
pub struct InMemoryListingRepository {
    listings: Arc<RwLock<HashMap<ListingId, Listing>>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.listings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.listings.read().await.is_empty()
    }
}

fn matching<'a>(
    listings: &'a HashMap<ListingId, Listing>,
    predicate: &ListingPredicate,
) -> Vec<&'a Listing> {
    listings
        .values()
        .filter(|listing| predicate.matches(listing))
        .collect()
}

fn sample(candidates: &[&Listing], limit: usize) -> Vec<Listing> {
    let mut rng = rand::thread_rng();
    let mut picked: Vec<Listing> = candidates
        .choose_multiple(&mut rng, limit)
        .map(|listing| (*listing).clone())
        .collect();
    picked.shuffle(&mut rng);
    picked
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn create(&self, listing: NewListing) -> DomainResult<Listing> {
        let mut guard = self.listings.write().await;
        let mut id = ListingId::generate();
        while guard.contains_key(&id) {
            id = ListingId::generate();
        }
        let stored = Listing::from_new(id, listing);
        guard.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ListingId) -> DomainResult<Option<Listing>> {
        Ok(self.listings.read().await.get(&id).cloned())
    }

    async fn find_many(
        &self,
        predicate: &ListingPredicate,
        sort: SortSpec,
        window: PageWindow,
    ) -> DomainResult<(Vec<Listing>, u64)> {
        let guard = self.listings.read().await;
        let mut hits = matching(&guard, predicate);
        let total = hits.len() as u64;
        hits.sort_by(|a, b| sort.compare(a, b));

        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let page = hits
            .into_iter()
            .skip(skip)
            .take(window.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn sample_many(
        &self,
        predicate: &ListingPredicate,
        limit: u32,
    ) -> DomainResult<(Vec<Listing>, u64)> {
        let guard = self.listings.read().await;
        let hits = matching(&guard, predicate);
        let total = hits.len() as u64;
        Ok((sample(&hits, limit as usize), total))
    }

    async fn update_by_id(&self, update: ListingUpdate) -> DomainResult<Listing> {
        let mut guard = self.listings.write().await;
        let listing = guard
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("listing not found".into()))?;
        listing.apply(update);
        Ok(listing.clone())
    }

    async fn delete_by_id(&self, id: ListingId) -> DomainResult<()> {
        self.listings
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("listing not found".into()))
    }
}
