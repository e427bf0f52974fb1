//! Purchase ledger models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use food_villa_core::{Email, FoodId, PurchaseId};

/// A recorded purchase.
///
/// `food_id` is a denormalized reference into the catalog - there is no
/// foreign-key constraint, so a purchase survives deletion of its item.
#[derive(Debug, Clone, Serialize)]
pub struct Purchase {
    pub id: PurchaseId,
    #[serde(rename = "foodId")]
    pub food_id: FoodId,
    #[serde(rename = "Buyer_email")]
    pub buyer_email: Email,
    pub quantity: i32,
    pub food_name: String,
    pub food_image: String,
    pub price: Decimal,
    pub ordered_at: DateTime<Utc>,
}

/// Payload for recording a purchase (`POST /purchase`).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPurchase {
    #[serde(rename = "foodId")]
    pub food_id: FoodId,
    #[serde(rename = "Buyer_email")]
    pub buyer_email: Email,
    pub quantity: i32,
    pub food_name: String,
    pub food_image: String,
    pub price: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_new_purchase_wire_names() {
        let json = r#"{
            "foodId": 7, "Buyer_email": "a@x.com", "quantity": 3,
            "food_name": "Pizza", "food_image": "pizza.png", "price": "9.99"
        }"#;
        let p: NewPurchase = serde_json::from_str(json).unwrap();
        assert_eq!(p.food_id, FoodId::new(7));
        assert_eq!(p.buyer_email.as_str(), "a@x.com");
        assert_eq!(p.quantity, 3);
    }

    #[test]
    fn test_purchase_serializes_with_wire_names() {
        let p = Purchase {
            id: PurchaseId::new(1),
            food_id: FoodId::new(7),
            buyer_email: Email::parse("a@x.com").unwrap(),
            quantity: 3,
            food_name: "Pizza".to_string(),
            food_image: "pizza.png".to_string(),
            price: Decimal::new(999, 2),
            ordered_at: Utc::now(),
        };
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["foodId"], 7);
        assert_eq!(value["Buyer_email"], "a@x.com");
        assert!(value.get("food_id").is_none());
    }

    #[test]
    fn test_new_purchase_rejects_unknown_fields() {
        let json = r#"{
            "foodId": 7, "Buyer_email": "a@x.com", "quantity": 3,
            "food_name": "Pizza", "food_image": "pizza.png", "price": "9.99",
            "id": 42
        }"#;
        assert!(serde_json::from_str::<NewPurchase>(json).is_err());
    }
}
