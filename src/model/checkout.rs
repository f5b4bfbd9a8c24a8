//! DTOs for the checkout endpoints.
//!
//! The catalog store never holds these. They are passed through the gateway as
//! opaque request/response bodies.

use super::product::ProductId;
use serde::{Deserialize, Serialize};

/// One product line sent to the checkout endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CheckoutLine {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Body of `POST /checkout/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutLine>,
}

/// A priced line in a checkout quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub subtotal: f64,
}

/// Response of `POST /checkout/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutQuote {
    pub items: Vec<QuotedLine>,
    pub shipping: f64,
    pub total: f64,
}

/// Payment methods accepted by the order endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "mpesa")]
    Mpesa,
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "credit_card")]
    CreditCard,
    #[serde(rename = "debit_card")]
    DebitCard,
    #[serde(rename = "voucher")]
    Voucher,
}

/// Body of `POST /checkout/process`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessCheckout {
    pub user_id: String,
    pub items: Vec<CheckoutLine>,
    pub payment_method: PaymentMethod,
    pub shipping_address: String,
}

/// The order created by a processed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub id: String,
    pub total_amount: f64,
}

/// Response of `POST /checkout/process`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfirmation {
    pub message: String,
    pub order: PlacedOrder,
}
