use super::listing::{validate_category, validate_condition, validate_status, violation};
use super::{FieldViolation, NumericInput, ValidationFailure};
use crate::domain::listing::{
    Category, Condition, FilterValue, ListingQuery, ListingStatus, SortOption,
    query::ALL_SENTINEL,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

pub const MAX_LIMIT: u32 = 100;

/// Raw query string of the listing read endpoints. Every parameter is
/// optional; [`ListingQueryInput::resolve`] applies per-endpoint defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingQueryInput {
    /// 1-based page number.
    #[validate(custom(function = "validate_page"))]
    #[param(value_type = Option<u32>, minimum = 1)]
    pub page: Option<NumericInput>,
    /// Page size, 1 to 100.
    #[validate(custom(function = "validate_limit"))]
    #[param(value_type = Option<u32>, minimum = 1, maximum = 100)]
    pub limit: Option<NumericInput>,
    /// newest, oldest, price-low, price-high, title or random.
    pub sort: Option<String>,
    #[validate(custom(function = "validate_category_filter"))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_condition_filter"))]
    pub condition: Option<String>,
    #[validate(custom(function = "validate_status_filter"))]
    pub status: Option<String>,
    /// Case-insensitive substring over title, description and category.
    #[validate(length(max = 100))]
    pub search: Option<String>,
    #[validate(custom(function = "validate_price_bound"))]
    #[param(value_type = Option<f64>, minimum = 0)]
    pub min_price: Option<NumericInput>,
    #[validate(custom(function = "validate_price_bound"))]
    #[param(value_type = Option<f64>, minimum = 0)]
    pub max_price: Option<NumericInput>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

/// Defaults that differ between the public browse endpoint and the
/// own-listings endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefaults {
    pub limit: u32,
    pub status: FilterValue<ListingStatus>,
}

impl QueryDefaults {
    pub const BROWSE: QueryDefaults = QueryDefaults {
        limit: 12,
        status: FilterValue::Only(ListingStatus::Active),
    };

    pub const OWN: QueryDefaults = QueryDefaults {
        limit: 50,
        status: FilterValue::All,
    };
}

impl ListingQueryInput {
    /// Validates every parameter and produces a fully resolved query. A
    /// contradictory price range is reported on `min_price`.
    pub fn resolve(self, defaults: QueryDefaults) -> Result<ListingQuery, ValidationFailure> {
        let input = self.normalized();
        let mut failure = ValidationFailure::default();
        if let Err(errors) = input.validate() {
            failure.extend_from(&errors);
        }

        let min_price = input.min_price.as_ref().and_then(NumericInput::to_f64);
        let max_price = input.max_price.as_ref().and_then(NumericInput::to_f64);
        let contradictory = matches!(
            (min_price, max_price),
            (Some(min), Some(max)) if min >= 0.0 && max >= 0.0 && min > max
        );
        if contradictory {
            failure.push(FieldViolation::new(
                "min_price",
                "must not exceed max_price",
                serde_json::to_value(&input.min_price).ok(),
            ));
        }
        failure.into_result()?;

        Ok(ListingQuery {
            page: input.page.as_ref().and_then(NumericInput::to_u32).unwrap_or(1),
            limit: input
                .limit
                .as_ref()
                .and_then(NumericInput::to_u32)
                .unwrap_or(defaults.limit),
            sort: input
                .sort
                .as_deref()
                .map(SortOption::parse_lenient)
                .unwrap_or_default(),
            category: filter_value::<Category>(input.category.as_deref(), FilterValue::All)?,
            condition: filter_value::<Condition>(input.condition.as_deref(), FilterValue::All)?,
            status: filter_value::<ListingStatus>(input.status.as_deref(), defaults.status)?,
            search: input.search,
            min_price,
            max_price,
            location: input.location,
            owner: None,
        })
    }

    fn normalized(self) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let present = |value: Option<NumericInput>| value.filter(|v| !v.is_blank());
        Self {
            page: present(self.page),
            limit: present(self.limit),
            sort: clean(self.sort),
            category: clean(self.category),
            condition: clean(self.condition),
            status: clean(self.status),
            search: clean(self.search),
            min_price: present(self.min_price),
            max_price: present(self.max_price),
            location: clean(self.location),
        }
    }
}

fn filter_value<T>(
    raw: Option<&str>,
    default: FilterValue<T>,
) -> Result<FilterValue<T>, ValidationFailure>
where
    T: FromStr<Err = crate::domain::errors::DomainError>,
{
    match raw {
        None => Ok(default),
        Some(value) if value.eq_ignore_ascii_case(ALL_SENTINEL) => Ok(FilterValue::All),
        Some(value) => Ok(FilterValue::Only(T::from_str(value)?)),
    }
}

fn validate_page(value: &NumericInput) -> Result<(), ValidationError> {
    match value.to_u32() {
        Some(page) if page >= 1 => Ok(()),
        _ => Err(violation("range", "must be an integer of at least 1", value)),
    }
}

fn validate_limit(value: &NumericInput) -> Result<(), ValidationError> {
    match value.to_u32() {
        Some(limit) if (1..=MAX_LIMIT).contains(&limit) => Ok(()),
        _ => Err(violation(
            "range",
            format!("must be an integer between 1 and {MAX_LIMIT}"),
            value,
        )),
    }
}

fn validate_price_bound(value: &NumericInput) -> Result<(), ValidationError> {
    match value.to_f64() {
        Some(price) if price >= 0.0 => Ok(()),
        Some(_) => Err(violation("range", "must be at least 0", value)),
        None => Err(violation("number", "must be a number", value)),
    }
}

fn validate_category_filter(value: &str) -> Result<(), ValidationError> {
    allow_sentinel(value, validate_category)
}

fn validate_condition_filter(value: &str) -> Result<(), ValidationError> {
    allow_sentinel(value, validate_condition)
}

fn validate_status_filter(value: &str) -> Result<(), ValidationError> {
    allow_sentinel(value, validate_status)
}

fn allow_sentinel(
    value: &str,
    member: fn(&str) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    if value.eq_ignore_ascii_case(ALL_SENTINEL) {
        Ok(())
    } else {
        member(value).map_err(|err| {
            let message = err
                .message
                .as_ref()
                .map(|m| format!("{m}, or {ALL_SENTINEL}"))
                .unwrap_or_else(|| format!("must be a known value or {ALL_SENTINEL}"));
            violation("enum", message, &value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pairs: &[(&str, &str)]) -> ListingQueryInput {
        let value: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(value)).unwrap()
    }

    #[test]
    fn browse_defaults_are_applied() {
        let query = ListingQueryInput::default()
            .resolve(QueryDefaults::BROWSE)
            .unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 12);
        assert_eq!(query.sort, SortOption::Newest);
        assert_eq!(query.status, FilterValue::Only(ListingStatus::Active));
        assert_eq!(query.category, FilterValue::All);
    }

    #[test]
    fn own_defaults_include_every_status() {
        let query = ListingQueryInput::default()
            .resolve(QueryDefaults::OWN)
            .unwrap();
        assert_eq!(query.limit, 50);
        assert_eq!(query.status, FilterValue::All);
    }

    #[test]
    fn numeric_strings_and_case_insensitive_enums_resolve() {
        let query = input(&[
            ("page", "2"),
            ("limit", "10"),
            ("category", "Electronics"),
            ("status", "ALL"),
            ("sort", "price-low"),
        ])
        .resolve(QueryDefaults::BROWSE)
        .unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 10);
        assert_eq!(query.category, FilterValue::Only(Category::Electronics));
        assert_eq!(query.status, FilterValue::All);
        assert_eq!(query.sort, SortOption::PriceLow);
    }

    #[test]
    fn contradictory_price_range_is_rejected() {
        let failure = input(&[("min_price", "50"), ("max_price", "10")])
            .resolve(QueryDefaults::BROWSE)
            .unwrap_err();
        assert_eq!(failure.fields(), vec!["min_price"]);
    }

    #[test]
    fn every_bad_parameter_is_reported() {
        let failure = input(&[
            ("page", "0"),
            ("limit", "500"),
            ("category", "furniture"),
            ("min_price", "-1"),
        ])
        .resolve(QueryDefaults::BROWSE)
        .unwrap_err();
        assert_eq!(failure.fields(), vec!["category", "limit", "min_price", "page"]);
    }

    #[test]
    fn blank_numeric_parameters_read_as_absent() {
        let query = input(&[
            ("page", ""),
            ("limit", " "),
            ("min_price", ""),
            ("max_price", ""),
        ])
        .resolve(QueryDefaults::BROWSE)
        .unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 12);
        assert_eq!(query.min_price, None);
        assert_eq!(query.max_price, None);
    }

    #[test]
    fn unknown_sort_is_not_an_error() {
        let query = input(&[("sort", "popularity")])
            .resolve(QueryDefaults::BROWSE)
            .unwrap();
        assert_eq!(query.sort, SortOption::Newest);
    }
}
