// src/domain/listing/filter.rs
use crate::domain::listing::{
    entity::Listing,
    query::{ListingQuery, SortOption},
    value_objects::{Category, Condition, ListingStatus, OwnerId},
};
use std::cmp::Ordering;

/// Storage-neutral filter condition. Every term is optional; absent terms
/// match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPredicate {
    pub owner_id: Option<OwnerId>,
    pub status: Option<ListingStatus>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    /// Lower-cased search term, matched as a substring of title,
    /// description or category.
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Lower-cased location fragment.
    pub location: Option<String>,
}

impl ListingPredicate {
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(owner) = &self.owner_id {
            if &listing.owner_id != owner {
                return false;
            }
        }
        if self.status.is_some_and(|status| listing.status != status) {
            return false;
        }
        if self.category.is_some_and(|category| listing.category != category) {
            return false;
        }
        if self
            .condition
            .is_some_and(|condition| listing.condition != condition)
        {
            return false;
        }
        let price = listing.price.value();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        if let Some(term) = &self.search {
            let hit = contains_ci(listing.title.as_str(), term)
                || contains_ci(listing.description.as_str(), term)
                || contains_ci(listing.category.as_str(), term);
            if !hit {
                return false;
            }
        }
        if let Some(fragment) = &self.location {
            let hit = listing
                .location
                .as_deref()
                .is_some_and(|location| contains_ci(location, fragment));
            if !hit {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    Price,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Total order used by adapters that sort in process. Ties are broken by
    /// id in the same direction so repeated reads return identical pages.
    pub fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        let primary = match self.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Price => a.price.value().total_cmp(&b.price.value()),
            SortKey::Title => a.title.as_str().cmp(b.title.as_str()),
        };
        let ordering = primary.then_with(|| a.id.cmp(&b.id));
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortKey::CreatedAt, SortDirection::Desc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPlan {
    Ordered(SortSpec),
    Random,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub predicate: ListingPredicate,
    pub plan: ReadPlan,
}

impl SortOption {
    pub fn read_plan(&self) -> ReadPlan {
        use SortDirection::{Asc, Desc};
        use SortKey::{CreatedAt, Price, Title};

        match self {
            SortOption::Newest => ReadPlan::Ordered(SortSpec::new(CreatedAt, Desc)),
            SortOption::Oldest => ReadPlan::Ordered(SortSpec::new(CreatedAt, Asc)),
            SortOption::PriceLow => ReadPlan::Ordered(SortSpec::new(Price, Asc)),
            SortOption::PriceHigh => ReadPlan::Ordered(SortSpec::new(Price, Desc)),
            SortOption::Title => ReadPlan::Ordered(SortSpec::new(Title, Asc)),
            SortOption::Random => ReadPlan::Random,
        }
    }
}

/// Translates a resolved query into a predicate and read plan.
pub fn compile(query: &ListingQuery) -> CompiledQuery {
    let predicate = ListingPredicate {
        owner_id: query.owner.clone(),
        status: query.status.selected(),
        category: query.category.selected(),
        condition: query.condition.selected(),
        search: normalized_term(query.search.as_deref()),
        min_price: query.min_price,
        max_price: query.max_price,
        location: normalized_term(query.location.as_deref()),
    };

    CompiledQuery {
        predicate,
        plan: query.sort.read_plan(),
    }
}

fn normalized_term(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}
