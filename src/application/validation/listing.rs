use super::{FieldViolation, NumericInput, ValidationFailure, body::FieldReader};
use crate::domain::errors::DomainError;
use crate::domain::listing::{
    Category, Condition, ContactEmail, ListingDescription, ListingId, ListingImages,
    ListingStatus, ListingTitle, ListingUpdate, NewListing, OwnerId, Price,
    value_objects::{MAX_IMAGES, MAX_PRICE},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidateUrl, ValidationError};

/// Body of `POST /api/v1/listings`. Every field is optional at the serde
/// level and read leniently, so missing or mistyped fields are reported
/// together instead of failing deserialization on the first one. Unknown
/// fields (including `owner_id`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Validate, ToSchema)]
pub struct CreateListingInput {
    #[validate(required, length(min = 5, max = 200))]
    pub title: Option<String>,
    #[validate(required, length(min = 10, max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 5), custom(function = "validate_image_urls"))]
    pub images: Option<Vec<String>>,
    #[validate(required, custom(function = "validate_category"))]
    pub category: Option<String>,
    #[validate(required, custom(function = "validate_price"))]
    #[schema(value_type = Option<f64>, example = 45.0)]
    pub price: Option<NumericInput>,
    #[validate(required, custom(function = "validate_condition"))]
    pub condition: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(required, email)]
    pub contact_email: Option<String>,
    #[validate(length(max = 30))]
    pub contact_phone: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 200))]
    pub meeting_point: Option<String>,
    /// Fields whose JSON type was wrong, found while reading the body.
    #[serde(skip)]
    pub type_violations: ValidationFailure,
}

impl CreateListingInput {
    /// Trims text fields and treats blank optional text as absent.
    pub fn normalized(self) -> Self {
        Self {
            title: trim_to_none(self.title),
            description: trim_to_none(self.description),
            images: self.images.map(normalize_images),
            category: trim_to_none(self.category),
            price: self.price,
            condition: trim_to_none(self.condition),
            status: trim_to_none(self.status),
            contact_email: trim_to_none(self.contact_email),
            contact_phone: trim_to_none(self.contact_phone),
            location: trim_to_none(self.location),
            meeting_point: trim_to_none(self.meeting_point),
            type_violations: self.type_violations,
        }
    }

    /// Normalizes, validates every field, and builds the record to insert.
    /// The owner always comes from the authenticated identity.
    pub fn into_new_listing(
        self,
        owner_id: OwnerId,
        created_at: DateTime<Utc>,
    ) -> Result<NewListing, ValidationFailure> {
        let mut input = self.normalized();
        input.check()?;

        let status = match input.status.as_deref() {
            Some(raw) => ListingStatus::from_str(raw)?,
            None => ListingStatus::default(),
        };

        Ok(NewListing {
            title: ListingTitle::new(required("title", input.title)?)?,
            description: ListingDescription::new(required("description", input.description)?)?,
            images: ListingImages::new(input.images.unwrap_or_default())?,
            category: Category::from_str(&required("category", input.category)?)?,
            price: Price::new(required_number("price", input.price.as_ref())?)?,
            condition: Condition::from_str(&required("condition", input.condition)?)?,
            status,
            contact_email: ContactEmail::new(required("contact_email", input.contact_email)?)?,
            contact_phone: input.contact_phone,
            location: input.location,
            meeting_point: input.meeting_point,
            owner_id,
            created_at,
        })
    }
}

/// Body of `PUT`/`PATCH /api/v1/listings/{id}`. All fields are optional;
/// for the optional contact fields an empty string clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Validate, ToSchema)]
pub struct UpdateListingInput {
    #[validate(length(min = 5, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 10, max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 5), custom(function = "validate_image_urls"))]
    pub images: Option<Vec<String>>,
    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<f64>, example = 40.0)]
    pub price: Option<NumericInput>,
    #[validate(custom(function = "validate_condition"))]
    pub condition: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(length(max = 30))]
    pub contact_phone: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 200))]
    pub meeting_point: Option<String>,
    /// Fields whose JSON type was wrong, found while reading the body.
    #[serde(skip)]
    pub type_violations: ValidationFailure,
}

impl UpdateListingInput {
    pub fn normalized(self) -> Self {
        Self {
            title: trim(self.title),
            description: trim(self.description),
            images: self.images.map(normalize_images),
            category: trim(self.category),
            price: self.price,
            condition: trim(self.condition),
            status: trim(self.status),
            contact_email: trim(self.contact_email),
            contact_phone: trim(self.contact_phone),
            location: trim(self.location),
            meeting_point: trim(self.meeting_point),
            type_violations: self.type_violations,
        }
    }

    /// Normalizes and validates the supplied fields, then builds the partial
    /// update. Fields that were not supplied are left untouched.
    pub fn into_update(
        self,
        id: ListingId,
        updated_at: DateTime<Utc>,
    ) -> Result<ListingUpdate, ValidationFailure> {
        let mut input = self.normalized();
        input.check()?;

        let mut update = ListingUpdate::new(id, updated_at);
        if let Some(title) = input.title {
            update = update.with_title(ListingTitle::new(title)?);
        }
        if let Some(description) = input.description {
            update = update.with_description(ListingDescription::new(description)?);
        }
        if let Some(images) = input.images {
            update = update.with_images(ListingImages::new(images)?);
        }
        if let Some(category) = input.category {
            update = update.with_category(Category::from_str(&category)?);
        }
        if let Some(price) = input.price.as_ref() {
            update = update.with_price(Price::new(required_number("price", Some(price))?)?);
        }
        if let Some(condition) = input.condition {
            update = update.with_condition(Condition::from_str(&condition)?);
        }
        if let Some(status) = input.status {
            update = update.with_status(ListingStatus::from_str(&status)?);
        }
        if let Some(email) = input.contact_email {
            update = update.with_contact_email(ContactEmail::new(email)?);
        }
        if let Some(phone) = input.contact_phone {
            update = update.with_contact_phone(non_empty(phone));
        }
        if let Some(location) = input.location {
            update = update.with_location(non_empty(location));
        }
        if let Some(meeting_point) = input.meeting_point {
            update = update.with_meeting_point(non_empty(meeting_point));
        }
        Ok(update)
    }
}

/// Lenient body reading shared by both listing schemas: the body must be a
/// JSON object, and each field is type-checked on its own.
macro_rules! lenient_listing_body {
    ($name:ident) => {
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let fields = Map::<String, Value>::deserialize(deserializer)?;
                Ok(Self::from_fields(fields))
            }
        }

        impl $name {
            pub fn from_fields(fields: Map<String, Value>) -> Self {
                let mut reader = FieldReader::new(fields);
                let mut input = Self {
                    title: reader.text("title"),
                    description: reader.text("description"),
                    images: reader.text_list("images"),
                    category: reader.text("category"),
                    price: reader.number("price"),
                    condition: reader.text("condition"),
                    status: reader.text("status"),
                    contact_email: reader.text("contact_email"),
                    contact_phone: reader.text("contact_phone"),
                    location: reader.text("location"),
                    meeting_point: reader.text("meeting_point"),
                    type_violations: ValidationFailure::default(),
                };
                input.type_violations = reader.finish();
                input
            }

            /// Type mismatches plus every derive-based violation, one
            /// report per field.
            fn check(&mut self) -> Result<(), ValidationFailure> {
                let mut failure = std::mem::take(&mut self.type_violations);
                if let Err(errors) = self.validate() {
                    failure.extend_from(&errors);
                }
                failure.into_result()
            }
        }
    };
}

lenient_listing_body!(CreateListingInput);
lenient_listing_body!(UpdateListingInput);

impl UpdateListingInput {
    /// Parses a raw request body. Only called once the caller is known to
    /// own the listing. A blank body is an empty update.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, ValidationFailure> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|err| {
            ValidationFailure::single(FieldViolation::new(
                "body",
                format!("Failed to parse the request body as JSON: {err}"),
                None,
            ))
        })
    }
}

fn trim(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn trim_to_none(value: Option<String>) -> Option<String> {
    trim(value).filter(|v| !v.is_empty())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn normalize_images(images: Vec<String>) -> Vec<String> {
    images.into_iter().map(|url| url.trim().to_string()).collect()
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationFailure> {
    value.ok_or_else(|| DomainError::invalid(field, "is required").into())
}

fn required_number(
    field: &'static str,
    value: Option<&NumericInput>,
) -> Result<f64, ValidationFailure> {
    value
        .and_then(NumericInput::to_f64)
        .ok_or_else(|| DomainError::invalid(field, "must be a number").into())
}

pub(crate) fn violation(
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
    value: &impl Serialize,
) -> ValidationError {
    let mut err = ValidationError::new(code).with_message(message.into());
    err.add_param(Cow::Borrowed("value"), value);
    err
}

fn validate_price(value: &NumericInput) -> Result<(), ValidationError> {
    match value.to_f64() {
        None => Err(violation("number", "must be a number", value)),
        Some(price) if price <= 0.0 => Err(violation("range", "must be greater than 0", value)),
        Some(price) if price > MAX_PRICE => Err(violation(
            "range",
            format!("must be at most {MAX_PRICE}"),
            value,
        )),
        Some(_) => Ok(()),
    }
}

fn validate_image_urls(images: &[String]) -> Result<(), ValidationError> {
    if images.len() > MAX_IMAGES {
        return Ok(());
    }
    match images.iter().find(|url| !url.validate_url()) {
        Some(bad) => Err(violation("url", "every image must be a valid URL", bad)),
        None => Ok(()),
    }
}

pub(crate) fn validate_category(value: &str) -> Result<(), ValidationError> {
    enum_member::<Category>(value)
}

pub(crate) fn validate_condition(value: &str) -> Result<(), ValidationError> {
    enum_member::<Condition>(value)
}

pub(crate) fn validate_status(value: &str) -> Result<(), ValidationError> {
    enum_member::<ListingStatus>(value)
}

fn enum_member<T>(value: &str) -> Result<(), ValidationError>
where
    T: FromStr<Err = DomainError>,
{
    match T::from_str(value) {
        Ok(_) => Ok(()),
        Err(DomainError::InvalidField { message, .. }) => {
            Err(violation("enum", message, &value))
        }
        Err(other) => Err(violation("enum", other.to_string(), &value)),
    }
}
