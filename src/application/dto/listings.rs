use crate::domain::listing::{
    Category, Condition, Listing, ListingQuery, ListingStatus, PageMeta, SortOption,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{pagination::PaginationDto, serde_time};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListingDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub category: Category,
    pub price: f64,
    pub condition: Condition,
    pub status: ListingStatus,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_point: Option<String>,
    pub owner_id: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Listing> for ListingDto {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id.as_uuid(),
            title: listing.title.into_inner(),
            description: listing.description.into_inner(),
            images: listing.images.into_inner(),
            category: listing.category,
            price: listing.price.value(),
            condition: listing.condition,
            status: listing.status,
            contact_email: listing.contact_email.into_inner(),
            contact_phone: listing.contact_phone,
            location: listing.location,
            meeting_point: listing.meeting_point,
            owner_id: listing.owner_id.into(),
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

/// Resolved enumeration filters echoed back to the client. Each value is a
/// member name or `all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppliedFiltersDto {
    pub sort: SortOption,
    pub category: String,
    pub condition: String,
    pub status: String,
}

impl From<&ListingQuery> for AppliedFiltersDto {
    fn from(query: &ListingQuery) -> Self {
        Self {
            sort: query.sort,
            category: query.category.to_string(),
            condition: query.condition.to_string(),
            status: query.status.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListingPageDto {
    pub listings: Vec<ListingDto>,
    pub pagination: PaginationDto,
    pub filters: AppliedFiltersDto,
}

impl ListingPageDto {
    /// Builds the list payload from one read, its page metadata and the
    /// query that produced it.
    pub fn assemble(listings: Vec<Listing>, meta: PageMeta, query: &ListingQuery) -> Self {
        Self {
            listings: listings.into_iter().map(ListingDto::from).collect(),
            pagination: meta.into(),
            filters: query.into(),
        }
    }
}
