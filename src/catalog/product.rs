use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::Model;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=Product+Image";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Cases,
    Chargers,
    Headphones,
    Cables,
    ScreenProtectors,
    PowerBanks,
    Speakers,
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specifications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
}

/// Aggregate customer rating. `average` stays within `0.0..=5.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub average: f64,
    pub count: u32,
}

/// A sellable catalog item.
///
/// Catalog management owns every field except `stock`, which order
/// placement and cancellation adjust.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub brand: String,
    #[serde(default = "placeholder_image")]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub specifications: Specifications,
    #[serde(default)]
    pub ratings: Ratings,
    #[serde(default = "active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

fn active() -> bool {
    true
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        category: Category,
        brand: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category,
            brand: brand.into(),
            image: placeholder_image(),
            images: vec![],
            stock: 0,
            featured: false,
            specifications: Specifications::default(),
            ratings: Ratings::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn with_specifications(mut self, specifications: Specifications) -> Self {
        self.specifications = specifications;
        self
    }

    /// Remove `quantity` units. Returns `false` and leaves stock untouched
    /// when not enough units are available.
    pub fn take_stock(&mut self, quantity: u32, at: DateTime<Utc>) -> bool {
        match self.stock.checked_sub(quantity) {
            Some(remaining) => {
                self.stock = remaining;
                self.updated_at = at;
                true
            }
            None => false,
        }
    }

    pub fn restore_stock(&mut self, quantity: u32, at: DateTime<Utc>) {
        self.stock = self.stock.saturating_add(quantity);
        self.updated_at = at;
    }
}

impl Model for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }
}
