use chrono::{DateTime, Duration, Utc};
use std::borrow::Cow;
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Smallest accepted price: one cent.
pub fn min_price() -> Decimal {
    Decimal::new(1, 2)
}

/// Exclusive upper bound on price; the column is `NUMERIC(12,2)`.
pub fn max_price() -> Decimal {
    Decimal::new(10_000_000_000, 0)
}

/// Fraction digits the price column keeps.
pub const PRICE_SCALE: u32 = 2;

fn price_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

// Anything the column would round or overflow is rejected here, not by the database
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < min_price() {
        return Err(price_error("min_price", "Price must be greater than 0"));
    }
    if *price >= max_price() {
        return Err(price_error(
            "max_price",
            "Price must be less than 10000000000",
        ));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(price_error(
            "price_scale",
            "Price must have at most 2 decimal places",
        ));
    }
    Ok(())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Lifecycle tag of a catalog item
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "product_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductStatus {
    /// Listed and sellable
    #[sea_orm(string_value = "active")]
    Active,
    /// Kept in the catalog but hidden from sale
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// Persisted shape of a product.
///
/// `id` is `None` until storage has assigned one. The length and range rules
/// repeat the request-level ones and are checked before every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub id: Option<i64>,
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(length(max = 100))]
    pub category: String,
    #[validate(length(max = 255))]
    pub image_url: String,
    #[validate(length(max = 100))]
    pub brand: Option<String>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// A not-yet-persisted product, both timestamps set to `now`.
    pub fn new(input: CreateProduct, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: input.name,
            description: Some(input.description),
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            image_url: input.image_url,
            brand: input.brand,
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Replace every mutable field; `id` and `created_at` are kept.
    pub fn apply(&mut self, changes: UpdateProduct, now: DateTime<Utc>) {
        self.name = changes.name;
        self.description = Some(changes.description);
        self.price = changes.price;
        self.quantity = changes.quantity;
        self.category = changes.category;
        self.image_url = changes.image_url;
        self.brand = Some(changes.brand);
        self.status = changes.status;
        self.touch(now);
    }

    /// Advance `updated_at`, strictly, even if the clock has not moved.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        // Storage keeps microseconds, so that is the smallest step that survives a round trip
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Body of `POST /products`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(
        custom(function = "validate_not_blank", message = "Name is required"),
        length(min = 3, max = 100, message = "Name must be between 3 and 100 characters")
    )]
    #[schema(example = "Widget")]
    pub name: String,

    #[validate(
        custom(function = "validate_not_blank", message = "Description is required"),
        length(min = 5, max = 500, message = "Description must be between 5 and 500 characters")
    )]
    #[schema(example = "A widget")]
    pub description: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,

    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    #[schema(example = 5)]
    pub quantity: i32,

    #[validate(
        custom(function = "validate_not_blank", message = "Category is required"),
        length(max = 100, message = "Category must be less than 100 characters")
    )]
    #[schema(example = "Tools")]
    pub category: String,

    #[validate(
        custom(function = "validate_not_blank", message = "Image URL is required"),
        length(max = 255, message = "Image URL must be less than 255 characters")
    )]
    #[schema(example = "http://x/img")]
    pub image_url: String,

    #[validate(length(max = 100, message = "Brand name should not exceed 100 characters"))]
    #[serde(default)]
    pub brand: Option<String>,

    pub status: ProductStatus,
}

/// Body of `PUT /products/{id}`. Every field is required and replaces the stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(
        custom(function = "validate_not_blank", message = "Name is required"),
        length(min = 3, max = 100, message = "Name must be between 3 and 100 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "validate_not_blank", message = "Description is required"),
        length(min = 5, max = 500, message = "Description must be between 5 and 500 characters")
    )]
    pub description: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 12.5)]
    pub price: Decimal,

    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    pub quantity: i32,

    #[validate(
        custom(function = "validate_not_blank", message = "Category is required"),
        length(max = 100, message = "Category must be less than 100 characters")
    )]
    pub category: String,

    #[validate(
        custom(function = "validate_not_blank", message = "Image URL is required"),
        length(max = 255, message = "Image URL must be less than 255 characters")
    )]
    pub image_url: String,

    #[validate(
        custom(function = "validate_not_blank", message = "Brand is required"),
        length(max = 100, message = "Brand name should not exceed 100 characters")
    )]
    pub brand: String,

    pub status: ProductStatus,
}

/// Product as returned to clients. Brand and timestamps are not exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadProduct {
    #[schema(example = 1)]
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
    pub image_url: String,
    pub status: ProductStatus,
}
