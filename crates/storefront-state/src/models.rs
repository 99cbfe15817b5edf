//! Wire Models
//!
//! Data structures matching the backend's JSON payloads.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Product card as rendered in catalog grids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// In the current user's favorites
    #[serde(default, alias = "is_favorite")]
    pub favorite: bool,
}

impl ProductCard {
    /// Initial state of the card's favorite button. A grid filtered to
    /// favorites only holds favorites, whatever the payload says.
    pub fn favorite_shown(&self, favorites_only: bool) -> bool {
        self.favorite || favorites_only
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str).filter(|url| !url.is_empty())
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// One line of the shopping cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "count")]
    pub quantity: u32,
    #[serde(alias = "price")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Response of `PATCH /cart/update`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CartUpdateResponse {
    #[serde(default)]
    pub removed: bool,
    #[serde(default, alias = "count")]
    pub quantity: Option<u32>,
}

/// Response of `POST /favorites/toggle/{id}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FavoriteToggle {
    #[serde(default, alias = "is_favorite", alias = "favorite")]
    pub active: Option<bool>,
}

/// Entry of `GET /chats/my`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: u64,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// Single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender_id: u64,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub message: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Order as shown on the account and support pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCard {
    pub id: u64,
    pub status: crate::orders::OrderStatus,
    #[serde(default, alias = "summa")]
    pub total: Decimal,
    #[serde(default, alias = "date", deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
}

/// Product line inside an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl OrderProduct {
    pub fn item_total(&self) -> Decimal {
        self.price * Decimal::from(self.count)
    }
}

/// `POST /orders/create` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderCreated {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub order_id: Option<u64>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// `GET /orders/user/{id}` page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrdersPage {
    #[serde(default)]
    pub orders: Vec<OrderCard>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub has_next: bool,
}

/// Published product review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    #[serde(default)]
    pub author: Option<String>,
    pub grade: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, alias = "comment_date", deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

impl Review {
    /// "★★★★☆" for a grade of 4
    pub fn stars(&self) -> String {
        let grade = usize::from(self.grade.min(5));
        format!("{}{}", "★".repeat(grade), "☆".repeat(5 - grade))
    }
}

/// Successful login/registration body (may be empty)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Accepts RFC 3339 timestamps as well as the naive ISO form FastAPI emits
/// for timezone-less columns; naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
    }
}

/// Format a timestamp in the viewer's local time.
///
/// `offset_minutes` follows `Date.getTimezoneOffset()`: minutes to add to
/// local time to get UTC (so UTC+3 is `-180`).
pub fn format_local(ts: &DateTime<Utc>, offset_minutes: i32) -> String {
    let offset = FixedOffset::west_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    ts.with_timezone(&offset).format("%d.%m.%Y %H:%M").to_string()
}

/// Price with two decimals and the ruble sign
pub fn format_price(amount: Decimal) -> String {
    format!("{:.2} ₽", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_naive_and_rfc3339() {
        let naive = parse_timestamp("2024-03-01T10:15:30.123456").unwrap();
        let aware = parse_timestamp("2024-03-01T13:15:30.123456+03:00").unwrap();
        assert_eq!(naive, aware);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_message_deserialize() {
        let json = r#"{"id":7,"sender_id":3,"sender_name":null,"message":"hi","created_at":"2024-03-01T10:15:30"}"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, 7);
        assert_eq!(msg.sender_name, None);
        assert_eq!(msg.created_at, Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap());
    }

    #[test]
    fn test_cart_line_aliases() {
        let line: CartLine =
            serde_json::from_str(r#"{"product_id":5,"name":"Mouse","count":2,"price":1499}"#).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total(), Decimal::from(2998));
    }

    #[test]
    fn test_format_local_moscow() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 21, 30, 0).unwrap();
        assert_eq!(format_local(&ts, -180), "02.03.2024 00:30");
        assert_eq!(format_local(&ts, 0), "01.03.2024 21:30");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(123450, 2)), "1234.50 ₽");
        assert_eq!(format_price(Decimal::from(10)), "10.00 ₽");
    }

    #[test]
    fn test_review_stars_and_date_alias() {
        let json = r#"{"id":2,"grade":4,"comment_date":"2024-02-10T08:00:00"}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.stars(), "★★★★☆");
        assert!(review.created_at.is_some());
        assert!(review.photo_urls.is_empty());
    }

    #[test]
    fn test_order_card_aliases() {
        let json = r#"{"id":1,"status":"processing","summa":2500,"date":"2024-01-02T03:04:05"}"#;
        let order: OrderCard = serde_json::from_str(json).unwrap();
        assert_eq!(order.total, Decimal::from(2500));
        assert!(order.created_at.is_some());
        assert!(order.products.is_empty());
    }
}
