// src/domain/listing/entity.rs
use crate::domain::listing::value_objects::{
    Category, Condition, ContactEmail, ListingDescription, ListingId, ListingImages,
    ListingStatus, ListingTitle, OwnerId, Price,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Listing {
    pub id: ListingId,
    pub title: ListingTitle,
    pub description: ListingDescription,
    pub images: ListingImages,
    pub category: Category,
    pub price: Price,
    pub condition: Condition,
    pub status: ListingStatus,
    pub contact_email: ContactEmail,
    pub contact_phone: Option<String>,
    pub location: Option<String>,
    pub meeting_point: Option<String>,
    pub owner_id: OwnerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_owned_by(&self, identity: &OwnerId) -> bool {
        &self.owner_id == identity
    }

    /// Materialises a stored record from a validated creation payload.
    pub fn from_new(id: ListingId, new: NewListing) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            images: new.images,
            category: new.category,
            price: new.price,
            condition: new.condition,
            status: new.status,
            contact_email: new.contact_email,
            contact_phone: new.contact_phone,
            location: new.location,
            meeting_point: new.meeting_point,
            owner_id: new.owner_id,
            created_at: new.created_at,
            updated_at: new.created_at,
        }
    }

    /// Applies the fields present in `update`. Identity fields (`id`,
    /// `owner_id`, `created_at`) are not part of an update and never change.
    pub fn apply(&mut self, update: ListingUpdate) {
        let ListingUpdate {
            id: _,
            title,
            description,
            images,
            category,
            price,
            condition,
            status,
            contact_email,
            contact_phone,
            location,
            meeting_point,
            updated_at,
        } = update;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(images) = images {
            self.images = images;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(condition) = condition {
            self.condition = condition;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(contact_email) = contact_email {
            self.contact_email = contact_email;
        }
        if let Some(contact_phone) = contact_phone {
            self.contact_phone = contact_phone;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(meeting_point) = meeting_point {
            self.meeting_point = meeting_point;
        }
        self.updated_at = updated_at;
    }
}

#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: ListingTitle,
    pub description: ListingDescription,
    pub images: ListingImages,
    pub category: Category,
    pub price: Price,
    pub condition: Condition,
    pub status: ListingStatus,
    pub contact_email: ContactEmail,
    pub contact_phone: Option<String>,
    pub location: Option<String>,
    pub meeting_point: Option<String>,
    pub owner_id: OwnerId,
    pub created_at: DateTime<Utc>,
}

/// Partial update of a listing. Optional free-text fields use a nested
/// option: `Some(None)` clears the stored value.
#[derive(Debug, Clone)]
pub struct ListingUpdate {
    pub id: ListingId,
    pub title: Option<ListingTitle>,
    pub description: Option<ListingDescription>,
    pub images: Option<ListingImages>,
    pub category: Option<Category>,
    pub price: Option<Price>,
    pub condition: Option<Condition>,
    pub status: Option<ListingStatus>,
    pub contact_email: Option<ContactEmail>,
    pub contact_phone: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub meeting_point: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

impl ListingUpdate {
    pub fn new(id: ListingId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            description: None,
            images: None,
            category: None,
            price: None,
            condition: None,
            status: None,
            contact_email: None,
            contact_phone: None,
            location: None,
            meeting_point: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: ListingTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_description(mut self, description: ListingDescription) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_images(mut self, images: ListingImages) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_contact_email(mut self, email: ContactEmail) -> Self {
        self.contact_email = Some(email);
        self
    }

    pub fn with_contact_phone(mut self, phone: Option<String>) -> Self {
        self.contact_phone = Some(phone);
        self
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_meeting_point(mut self, meeting_point: Option<String>) -> Self {
        self.meeting_point = Some(meeting_point);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.images.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.condition.is_none()
            && self.status.is_none()
            && self.contact_email.is_none()
            && self.contact_phone.is_none()
            && self.location.is_none()
            && self.meeting_point.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_listing() -> Listing {
        let now = Utc::now();
        Listing::from_new(
            ListingId::generate(),
            NewListing {
                title: ListingTitle::new("Calculus textbook").unwrap(),
                description: ListingDescription::new("Barely used, no highlights").unwrap(),
                images: ListingImages::default(),
                category: Category::Textbooks,
                price: Price::new(40.0).unwrap(),
                condition: Condition::LikeNew,
                status: ListingStatus::Active,
                contact_email: ContactEmail::new("seller@campus.edu").unwrap(),
                contact_phone: Some("555-0100".into()),
                location: None,
                meeting_point: None,
                owner_id: OwnerId::new("user-a").unwrap(),
                created_at: now,
            },
        )
    }

    #[test]
    fn from_new_sets_updated_at_to_creation_time() {
        let listing = sample_listing();
        assert_eq!(listing.created_at, listing.updated_at);
        assert!(listing.is_owned_by(&OwnerId::new("user-a").unwrap()));
        assert!(!listing.is_owned_by(&OwnerId::new("user-b").unwrap()));
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut listing = sample_listing();
        let created_at = listing.created_at;
        let later = created_at + Duration::seconds(30);
        let update = ListingUpdate::new(listing.id, later)
            .with_price(Price::new(35.0).unwrap())
            .with_status(ListingStatus::Inactive)
            .with_contact_phone(None);

        listing.apply(update);

        assert_eq!(listing.price.value(), 35.0);
        assert_eq!(listing.status, ListingStatus::Inactive);
        assert_eq!(listing.contact_phone, None);
        assert_eq!(listing.title.as_str(), "Calculus textbook");
        assert_eq!(listing.owner_id.as_str(), "user-a");
        assert_eq!(listing.created_at, created_at);
        assert_eq!(listing.updated_at, later);
    }

    #[test]
    fn empty_update_is_detected() {
        let update = ListingUpdate::new(ListingId::generate(), Utc::now());
        assert!(update.is_empty());
        assert!(!update.with_location(None).is_empty());
    }
}
