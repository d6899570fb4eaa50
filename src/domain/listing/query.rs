use crate::domain::listing::value_objects::{Category, Condition, ListingStatus, OwnerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Sentinel accepted by every enumeration filter to disable it.
pub const ALL_SENTINEL: &str = "all";

/// An enumeration filter after default resolution: either the sentinel
/// `all` or a single member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue<T> {
    All,
    Only(T),
}

impl<T: Copy> FilterValue<T> {
    pub fn selected(&self) -> Option<T> {
        match self {
            FilterValue::All => None,
            FilterValue::Only(value) => Some(*value),
        }
    }
}

impl<T: fmt::Display> fmt::Display for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::All => f.write_str(ALL_SENTINEL),
            FilterValue::Only(value) => value.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
    Title,
    Random,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Title => "title",
            SortOption::Random => "random",
        }
    }

    /// Unrecognised sort names fall back to `newest` instead of failing.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "oldest" => SortOption::Oldest,
            "price-low" => SortOption::PriceLow,
            "price-high" => SortOption::PriceHigh,
            "title" => SortOption::Title,
            "random" => SortOption::Random,
            _ => SortOption::Newest,
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved listing query: every default has been applied, so the
/// compiler and the response echo work from the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub page: u32,
    pub limit: u32,
    pub sort: SortOption,
    pub category: FilterValue<Category>,
    pub condition: FilterValue<Condition>,
    pub status: FilterValue<ListingStatus>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
    pub owner: Option<OwnerId>,
}

impl ListingQuery {
    pub fn is_random(&self) -> bool {
        self.sort == SortOption::Random
    }
}
