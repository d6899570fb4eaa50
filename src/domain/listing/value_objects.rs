use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{ValidateEmail, ValidateUrl};

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
pub const MAX_IMAGES: usize = 5;
pub const MAX_PRICE: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingId(Uuid);

impl ListingId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a client-supplied identifier. Anything that is not a UUID can
    /// never resolve to a stored listing.
    pub fn parse(value: &str) -> DomainResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| DomainError::NotFound("listing not found".into()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<ListingId> for Uuid {
    fn from(value: ListingId) -> Self {
        value.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stable identifier of the identity that created a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid("owner_id", "owner id cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<OwnerId> for String {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

fn check_char_range(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> DomainResult<()> {
    let count = value.chars().count();
    if count < min || count > max {
        return Err(DomainError::invalid(
            field,
            format!("must be between {min} and {max} characters"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTitle(String);

impl ListingTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        check_char_range("title", &value, TITLE_MIN_CHARS, TITLE_MAX_CHARS)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDescription(String);

impl ListingDescription {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        check_char_range(
            "description",
            &value,
            DESCRIPTION_MIN_CHARS,
            DESCRIPTION_MAX_CHARS,
        )?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingImages(Vec<String>);

impl ListingImages {
    pub fn new(urls: Vec<String>) -> DomainResult<Self> {
        if urls.len() > MAX_IMAGES {
            return Err(DomainError::invalid(
                "images",
                format!("at most {MAX_IMAGES} images are allowed"),
            ));
        }
        if let Some(index) = urls.iter().position(|url| !url.validate_url()) {
            return Err(DomainError::invalid(
                "images",
                format!("images[{index}] must be a valid URL"),
            ));
        }
        Ok(Self(urls))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::invalid("price", "must be greater than 0"));
        }
        if value > MAX_PRICE {
            return Err(DomainError::invalid(
                "price",
                format!("must not exceed {MAX_PRICE}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if !value.validate_email() {
            return Err(DomainError::invalid(
                "contact_email",
                "must be a valid email address",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Implements the string form shared by the listing enumerations. Parsing is
/// case-insensitive; the stored form is always the canonical member name.
macro_rules! listing_enum {
    ($name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn allowed_values() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == normalized)
                    .ok_or_else(|| {
                        DomainError::invalid(
                            $field,
                            format!("must be one of: {}", Self::allowed_values()),
                        )
                    })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Textbooks,
    Electronics,
    Dorm,
    Clothing,
    Sports,
    Gadgets,
    Transport,
    Misc,
}

listing_enum!(Category, "category", {
    Textbooks => "textbooks",
    Electronics => "electronics",
    Dorm => "dorm",
    Clothing => "clothing",
    Sports => "sports",
    Gadgets => "gadgets",
    Transport => "transport",
    Misc => "misc",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
}

listing_enum!(Condition, "condition", {
    New => "new",
    LikeNew => "like-new",
    Good => "good",
    Fair => "fair",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Inactive,
}

listing_enum!(ListingStatus, "status", {
    Active => "active",
    Inactive => "inactive",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed_and_bounded() {
        let title = ListingTitle::new("  Desk lamp  ").unwrap();
        assert_eq!(title.as_str(), "Desk lamp");
        assert!(ListingTitle::new("lamp").is_err());
        assert!(ListingTitle::new("x".repeat(201)).is_err());
    }

    #[test]
    fn price_must_be_positive_and_capped() {
        assert!(Price::new(0.0).is_err());
        assert!(Price::new(-5.0).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(100_000.01).is_err());
        assert_eq!(Price::new(100_000.0).unwrap().value(), 100_000.0);
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("Electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!(" LIKE-NEW ".parse::<Condition>().unwrap(), Condition::LikeNew);
        assert_eq!("inactive".parse::<ListingStatus>().unwrap(), ListingStatus::Inactive);
    }

    #[test]
    fn out_of_enum_values_are_rejected() {
        let err = "sold".parse::<ListingStatus>().unwrap_err();
        match err {
            DomainError::InvalidField { field, message } => {
                assert_eq!(field, "status");
                assert!(message.contains("active, inactive"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!("electro".parse::<Category>().is_err());
    }

    #[test]
    fn images_are_limited_and_must_be_urls() {
        let ok = ListingImages::new(vec!["https://cdn.example.com/a.jpg".into()]);
        assert!(ok.is_ok());
        let too_many = ListingImages::new(vec!["https://cdn.example.com/a.jpg".into(); 6]);
        assert!(too_many.is_err());
        assert!(ListingImages::new(vec!["not a url".into()]).is_err());
    }

    #[test]
    fn non_uuid_listing_ids_resolve_to_not_found() {
        assert!(matches!(
            ListingId::parse("abc"),
            Err(DomainError::NotFound(_))
        ));
        let id = ListingId::generate();
        assert_eq!(ListingId::parse(&id.to_string()).unwrap(), id);
    }
}
