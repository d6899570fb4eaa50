// src/application/queries/listings/service.rs
use std::sync::Arc;

use crate::domain::listing::ListingRepository;

pub struct ListingQueryService {
    pub(super) repo: Arc<dyn ListingRepository>,
}

impl ListingQueryService {
    pub fn new(repo: Arc<dyn ListingRepository>) -> Self {
        Self { repo }
    }
}
