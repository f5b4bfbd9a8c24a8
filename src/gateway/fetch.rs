//! # Fetch Gateway
//!
//! Turns catalog intents into HTTP calls and every result into an [`Outcome`].
//!
//! | Call | Request | Generic failure message |
//! |------|---------|-------------------------|
//! | [`FetchGateway::fetch_list`] | `GET /products?page=&pageSize=&category=&subcategory=` | "Failed to fetch products" |
//! | [`FetchGateway::fetch_one`] | `GET /products/:id` | "Failed to fetch product" |
//! | [`FetchGateway::search`] | `GET /products/search?q=` | "Search failed" |
//! | [`FetchGateway::calculate_checkout`] | `POST /checkout/calculate` | "Checkout failed" |
//! | [`FetchGateway::process_checkout`] | `POST /checkout/process` | "Checkout failed" |
//!
//! A failed response's message is taken from the body's `message`, then its
//! `error`, then the generic message of the call. Each call makes exactly one
//! request; nothing is retried or cached here.

use super::outcome::Outcome;
use super::transport::{Method, Transport, TransportResponse};
use crate::model::{
    CheckoutConfirmation, CheckoutQuote, CheckoutRequest, ListParams, ProcessCheckout, Product,
    ProductId, ProductPage,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

pub const LIST_FAILED: &str = "Failed to fetch products";
pub const PRODUCT_FAILED: &str = "Failed to fetch product";
pub const SEARCH_FAILED: &str = "Search failed";
pub const CHECKOUT_FAILED: &str = "Checkout failed";

#[derive(Deserialize)]
struct ListBody {
    products: Vec<Product>,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    pages: u32,
    #[serde(default, alias = "currentPage")]
    current_page: Option<u32>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(alias = "products")]
    results: Vec<Product>,
}

/// Gateway to the catalog API. Cloning shares the transport.
pub struct FetchGateway<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for FetchGateway<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
        }
    }
}

impl<T: Transport> FetchGateway<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Fetches one page of the (optionally filtered) catalog.
    pub async fn fetch_list(&self, params: &ListParams) -> Outcome<ProductPage> {
        let path = list_path(params);
        let outcome = self.call::<ListBody>(Method::Get, &path, None, LIST_FAILED).await;

        match outcome {
            Outcome::Success { payload } => {
                if let Err(reason) = check_products(&payload.products) {
                    warn!(%path, %reason, "Rejected list payload");
                    return Outcome::failure(LIST_FAILED, None);
                }
                let current_page = payload.current_page.unwrap_or(params.page);
                Outcome::success(ProductPage::new(
                    payload.products,
                    payload.total,
                    payload.pages,
                    current_page,
                ))
            }
            Outcome::Failure { message, code } => Outcome::Failure { message, code },
        }
    }

    /// Fetches a single product by id.
    pub async fn fetch_one(&self, id: &ProductId) -> Outcome<Product> {
        let encoded: String = url::form_urlencoded::byte_serialize(id.as_str().as_bytes()).collect();
        let path = format!("/products/{encoded}");
        let outcome = self.call::<Product>(Method::Get, &path, None, PRODUCT_FAILED).await;

        match outcome {
            Outcome::Success { payload } => match payload.validate() {
                Ok(()) => Outcome::success(payload),
                Err(reason) => {
                    warn!(%path, %reason, "Rejected product payload");
                    Outcome::failure(PRODUCT_FAILED, None)
                }
            },
            failure => failure,
        }
    }

    /// Runs a free-text product search.
    pub async fn search(&self, query: &str) -> Outcome<Vec<Product>> {
        let query_string = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .finish();
        let path = format!("/products/search?{query_string}");
        let outcome = self.call::<SearchBody>(Method::Get, &path, None, SEARCH_FAILED).await;

        match outcome {
            Outcome::Success { payload } => {
                if let Err(reason) = check_products(&payload.results) {
                    warn!(%path, %reason, "Rejected search payload");
                    return Outcome::failure(SEARCH_FAILED, None);
                }
                Outcome::success(payload.results)
            }
            Outcome::Failure { message, code } => Outcome::Failure { message, code },
        }
    }

    /// Prices a prospective order.
    pub async fn calculate_checkout(&self, request: &CheckoutRequest) -> Outcome<CheckoutQuote> {
        self.post("/checkout/calculate", request).await
    }

    /// Places an order.
    pub async fn process_checkout(&self, request: &ProcessCheckout) -> Outcome<CheckoutConfirmation> {
        self.post("/checkout/process", request).await
    }

    async fn post<B: Serialize, P: DeserializeOwned>(&self, path: &str, body: &B) -> Outcome<P> {
        match serde_json::to_value(body) {
            Ok(body) => self.call(Method::Post, path, Some(body), CHECKOUT_FAILED).await,
            Err(e) => {
                warn!(path, error = %e, "Could not encode request body");
                Outcome::failure(CHECKOUT_FAILED, None)
            }
        }
    }

    async fn call<P: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        generic: &str,
    ) -> Outcome<P> {
        debug!(method = method.as_str(), path, "Gateway call");

        let response = match self.transport.request(method, path, body).await {
            Ok(response) => response,
            Err(e) => {
                warn!(path, error = %e, "Transport failure");
                return Outcome::failure(generic, None);
            }
        };

        if !response.is_success() {
            let message = server_message(&response).unwrap_or(generic).to_string();
            warn!(path, status = response.status, %message, "Server failure");
            return Outcome::failure(message, Some(response.status));
        }

        match serde_json::from_value(response.body) {
            Ok(payload) => Outcome::success(payload),
            Err(e) => {
                warn!(path, status = response.status, error = %e, "Undecodable payload");
                Outcome::failure(generic, None)
            }
        }
    }
}

fn list_path(params: &ListParams) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("page", &params.page.to_string())
        .append_pair("pageSize", &params.page_size.to_string());
    if let Some(category) = &params.filter.category {
        query.append_pair("category", category.as_str());
    }
    if let Some(subcategory) = &params.filter.subcategory {
        query.append_pair("subcategory", subcategory.as_str());
    }
    format!("/products?{}", query.finish())
}

fn server_message(response: &TransportResponse) -> Option<&str> {
    ["message", "error"]
        .iter()
        .find_map(|key| response.body.get(key).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
}

fn check_products(products: &[Product]) -> Result<(), String> {
    products.iter().try_for_each(Product::validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::MockTransport;
    use crate::gateway::TransportError;
    use crate::model::{CheckoutLine, PaymentMethod};
    use serde_json::json;

    fn gateway() -> (MockTransport, FetchGateway<MockTransport>) {
        let mock = MockTransport::new();
        (mock.clone(), FetchGateway::new(mock))
    }

    #[tokio::test]
    async fn test_fetch_list_success() {
        let (mock, gateway) = gateway();
        mock.expect_get("/products?page=2&pageSize=10").return_json(
            200,
            json!({
                "products": [{ "id": "1", "product_name": "Lipstick", "price": 12.5, "stock_qty": 4 }],
                "total": 25,
                "pages": 3,
                "current_page": 2
            }),
        );

        let page = gateway.fetch_list(&ListParams::page(2)).await.into_result().unwrap();
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].name, "Lipstick");
        assert_eq!((page.total, page.pages, page.current_page), (25, 3, 2));
        mock.verify();
    }

    #[tokio::test]
    async fn test_fetch_list_encodes_filter() {
        let (mock, gateway) = gateway();
        mock.expect_get("/products?page=1&pageSize=20&category=skin+care&subcategory=serums")
            .return_json(200, json!({ "products": [] }));

        let params = ListParams::page(1)
            .with_page_size(20)
            .in_category("skin care")
            .in_subcategory("serums");
        let page = gateway.fetch_list(&params).await.into_result().unwrap();

        assert!(page.products.is_empty());
        assert_eq!(page.current_page, 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_server_message_is_preferred() {
        let (mock, gateway) = gateway();
        mock.expect_get("/products?page=1&pageSize=10")
            .return_json(500, json!({ "message": "Database unavailable", "error": "E_DB" }));

        let outcome = gateway.fetch_list(&ListParams::default()).await;
        assert_eq!(outcome, Outcome::failure("Database unavailable", Some(500)));
    }

    #[tokio::test]
    async fn test_error_field_is_used_without_message() {
        let (mock, gateway) = gateway();
        mock.expect_get("/products/9").return_json(404, json!({ "error": "Product not found" }));

        let outcome = gateway.fetch_one(&ProductId::from(9)).await;
        assert_eq!(outcome, Outcome::failure("Product not found", Some(404)));
    }

    #[tokio::test]
    async fn test_generic_message_without_body() {
        let (mock, gateway) = gateway();
        mock.expect_get("/products/search?q=lip+gloss").return_json(502, Value::Null);

        let outcome = gateway.search("lip gloss").await;
        assert_eq!(outcome, Outcome::failure(SEARCH_FAILED, Some(502)));
    }

    #[tokio::test]
    async fn test_transport_failure_has_no_code() {
        let (mock, gateway) = gateway();
        mock.expect_get("/products?page=1&pageSize=10").return_err(TransportError::Timeout);

        let outcome = gateway.fetch_list(&ListParams::default()).await;
        assert_eq!(outcome, Outcome::failure(LIST_FAILED, None));
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_failure() {
        let (mock, gateway) = gateway();
        mock.expect_get("/products?page=1&pageSize=10").return_json(200, json!({ "items": [] }));

        let outcome = gateway.fetch_list(&ListParams::default()).await;
        assert_eq!(outcome, Outcome::failure(LIST_FAILED, None));
    }

    #[tokio::test]
    async fn test_negative_price_is_failure() {
        let (mock, gateway) = gateway();
        mock.expect_get("/products/1")
            .return_json(200, json!({ "id": "1", "product_name": "Broken", "price": -2.0 }));

        let outcome = gateway.fetch_one(&ProductId::from(1)).await;
        assert_eq!(outcome, Outcome::failure(PRODUCT_FAILED, None));
    }

    #[tokio::test]
    async fn test_search_accepts_products_key() {
        let (mock, gateway) = gateway();
        mock.expect_get("/products/search?q=blush").return_json(
            200,
            json!({ "products": [{ "id": "7", "name": "Blush", "price": 8.0 }] }),
        );

        let results = gateway.search("blush").await.into_result().unwrap();
        assert_eq!(results[0].id, ProductId::from(7));
    }

    #[tokio::test]
    async fn test_checkout_round_trip() {
        let (mock, gateway) = gateway();
        mock.expect_post("/checkout/calculate").return_json(
            200,
            json!({
                "items": [{ "product_id": "1", "product_name": "Lipstick", "quantity": 2, "subtotal": 25.0 }],
                "shipping": 3.0,
                "total": 28.0
            }),
        );
        mock.expect_post("/checkout/process").return_json(400, json!({ "message": "Out of stock" }));

        let quote = gateway
            .calculate_checkout(&CheckoutRequest {
                items: vec![CheckoutLine::new(1, 2)],
            })
            .await
            .into_result()
            .unwrap();
        assert_eq!(quote.total, 28.0);

        let placed = gateway
            .process_checkout(&ProcessCheckout {
                user_id: "u1".into(),
                items: vec![CheckoutLine::new(1, 2)],
                payment_method: PaymentMethod::Mpesa,
                shipping_address: "Nairobi".into(),
            })
            .await;
        assert_eq!(placed, Outcome::failure("Out of stock", Some(400)));
        mock.verify();
    }
}
