// src/application/commands/listings/service.rs
use std::sync::Arc;

use crate::{application::ports::time::Clock, domain::listing::ListingRepository};

pub struct ListingCommandService {
    pub(super) repo: Arc<dyn ListingRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ListingCommandService {
    pub fn new(repo: Arc<dyn ListingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}
