use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Product entity as held by the data store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Product {
    /// Build a fresh, non-deleted product with a new id and creation time
    pub fn new(name: String, category: String, price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            price,
            created_at: Utc::now(),
            is_deleted: false,
        }
    }

    /// Overwrite the mutable fields; id, creation time and the deleted flag are kept
    pub fn apply_update(&mut self, input: UpdateProductDto) {
        self.name = input.name;
        self.category = input.category;
        self.price = input.price;
    }
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    /// JSON number. It passes through `f64` on the wire, so at most 15
    /// significant digits are exact.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            price: product.price,
            created_at: product.created_at,
            is_deleted: product.is_deleted,
        }
    }
}

/// DTO for creating a new product
///
/// Missing fields fall back to empty values so they are reported by
/// validation instead of failing body deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[validate(custom(function = "validate_name"))]
    #[serde(default)]
    #[schema(example = "Widget")]
    pub name: String,
    #[validate(custom(function = "validate_category"))]
    #[serde(default)]
    #[schema(example = "Tools")]
    pub category: String,
    /// Read as `f64`; digits past the 15th significant one are not kept
    #[validate(custom(function = "validate_price"))]
    #[serde(default, with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
}

/// DTO for replacing a product's name, category and price
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    #[validate(custom(function = "validate_name"))]
    #[serde(default)]
    #[schema(example = "Widget Pro")]
    pub name: String,
    #[validate(custom(function = "validate_category"))]
    #[serde(default)]
    #[schema(example = "Tools")]
    pub category: String,
    /// Read as `f64`; digits past the 15th significant one are not kept
    #[validate(custom(function = "validate_price"))]
    #[serde(default, with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 12.5)]
    pub price: Decimal,
}

/// Query parameters for listing products
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// Case-insensitive substring of the product name
    pub keyword: Option<String>,
    /// Case-insensitive exact category
    pub category: Option<String>,
    /// 1-based page number; values below 1 are treated as 1
    pub page: i64,
    /// Items per page, clamped to 1..=100
    pub page_size: i64,
    /// Include soft-deleted products
    pub include_deleted: bool,
}

impl Default for ListProductsQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            category: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            include_deleted: false,
        }
    }
}

/// Normalized listing criteria handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub page: usize,
    pub page_size: usize,
    pub include_deleted: bool,
}

impl From<ListProductsQuery> for ProductFilter {
    fn from(query: ListProductsQuery) -> Self {
        // Both bounds are positive after clamping, so the casts cannot wrap.
        Self {
            keyword: query.keyword,
            category: query.category,
            page: query.page.max(1) as usize,
            page_size: query.page_size.clamp(1, MAX_PAGE_SIZE) as usize,
            include_deleted: query.include_deleted,
        }
    }
}

/// One page of products plus the number of matches before pagination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub page_number: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub items: Vec<ProductDto>,
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    required(name, "Name is required.")
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    required(category, "Category is required.")
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("range")
            .with_message(Cow::Borrowed("Price must be greater than 0.")));
    }
    Ok(())
}
