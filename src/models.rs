//! The logical schema every access strategy runs against. Two top-level
//! collections: lightweight flat categories and orders with nested
//! subdocuments.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

pub const CATEGORIES: &str = "categories";
pub const ORDERS: &str = "orders";

/// Marker field set on every document inserted by a write benchmark so the
/// runner can purge them after each scheduling group.
pub const BENCHMARK_MARKER: &str = "_benchmark";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub view_count: i64,
    pub is_active: bool,
    #[serde(
        rename = "_benchmark",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub benchmark: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_number: String,
    pub customer_email: String,
    pub status: String,
    pub total_cents: i64,
    pub item_count: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub shipping_address: Address,
    pub payment: Payment,
    pub line_items: Vec<LineItem>,
    pub status_history: Vec<StatusEntry>,
    #[serde(
        rename = "_benchmark",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub benchmark: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub method: String,
    pub last_four: String,
    pub charged_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: String,
    pub changed_at: DateTime,
}

/// Projection target for single-field category reads.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryName {
    pub name: String,
}

/// Projection target for single-field order reads.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderEmail {
    pub customer_email: String,
}
