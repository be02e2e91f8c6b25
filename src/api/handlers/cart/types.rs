//! Request/response types for the cart endpoints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::store::models::Product;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AddItemRequest {
    pub product_id: String,
    /// Added to the current quantity; defaults to 1.
    pub quantity: Option<i64>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SetItemRequest {
    /// New quantity; 0 removes the line.
    pub quantity: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: u32,
    pub subtotal: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub total: i64,
    pub count: u32,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct OrderResponse {
    pub order_id: String,
    pub items: Vec<CartLine>,
    pub total: i64,
    /// The payment step is a mock that always succeeds.
    pub status: String,
}

/// Price the cart against the live product list.
///
/// Lines whose product no longer exists are skipped; an admin deleting a
/// product quietly removes it from every open cart, which is how the
/// array-backed original behaved.
pub(super) fn price_cart(cart: &HashMap<String, u32>, products: &[Product]) -> CartResponse {
    let mut items: Vec<CartLine> = cart
        .iter()
        .filter(|(_, quantity)| **quantity > 0)
        .filter_map(|(product_id, quantity)| {
            let product = products.iter().find(|p| p.id == *product_id)?;
            let quantity = *quantity;
            Some(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                unit_price: product.price,
                quantity,
                subtotal: product.price * i64::from(quantity),
            })
        })
        .collect();
    items.sort_by(|a, b| a.product_id.cmp(&b.product_id));

    let total = items.iter().map(|line| line.subtotal).sum();
    let count = items.iter().map(|line| line.quantity).sum();
    CartResponse {
        items,
        total,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("producto {id}"),
            price,
            category: "naked".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn empty_cart_prices_to_zero() {
        let cart = HashMap::new();
        let response = price_cart(&cart, &[product("a", 100)]);
        assert!(response.items.is_empty());
        assert_eq!(response.total, 0);
        assert_eq!(response.count, 0);
    }

    #[test]
    fn totals_sum_lines() {
        let mut cart = HashMap::new();
        cart.insert("a".to_string(), 2);
        cart.insert("b".to_string(), 1);
        let response = price_cart(&cart, &[product("a", 100), product("b", 250)]);
        assert_eq!(response.total, 450);
        assert_eq!(response.count, 3);
        assert_eq!(response.items.len(), 2);
    }

    #[test]
    fn missing_product_drops_out_of_totals() {
        let mut cart = HashMap::new();
        cart.insert("a".to_string(), 2);
        cart.insert("gone".to_string(), 5);
        let response = price_cart(&cart, &[product("a", 100)]);
        assert_eq!(response.total, 200);
        assert_eq!(response.count, 2);
    }

    #[test]
    fn zero_quantity_lines_are_hidden() {
        let mut cart = HashMap::new();
        cart.insert("a".to_string(), 0);
        let response = price_cart(&cart, &[product("a", 100)]);
        assert!(response.items.is_empty());
        assert_eq!(response.count, 0);
    }
}
