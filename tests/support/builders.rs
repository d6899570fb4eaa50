// tests/support/builders.rs
use campus_market::application::validation::{CreateListingInput, NumericInput};
use serde_json::{Value, json};

/// Valid create payload with overridable fields.
pub struct ListingInputBuilder {
    title: String,
    description: String,
    category: String,
    price: f64,
    condition: String,
    status: Option<String>,
    location: Option<String>,
}

impl ListingInputBuilder {
    pub fn new() -> Self {
        Self {
            title: "Desk lamp with LED bulb".into(),
            description: "Works perfectly, pick up near the library.".into(),
            category: "dorm".into(),
            price: 15.0,
            condition: "good".into(),
            status: None,
            location: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn build(self) -> CreateListingInput {
        CreateListingInput {
            title: Some(self.title),
            description: Some(self.description),
            images: None,
            category: Some(self.category),
            price: Some(NumericInput::Number(self.price)),
            condition: Some(self.condition),
            status: self.status,
            contact_email: Some("seller@campus.edu".into()),
            contact_phone: None,
            location: self.location,
            meeting_point: None,
            ..Default::default()
        }
    }

    pub fn json(self) -> Value {
        let mut body = json!({
            "title": self.title,
            "description": self.description,
            "category": self.category,
            "price": self.price,
            "condition": self.condition,
            "contact_email": "seller@campus.edu",
        });
        if let Some(status) = self.status {
            body["status"] = json!(status);
        }
        if let Some(location) = self.location {
            body["location"] = json!(location);
        }
        body
    }
}
