// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order payload types handed to integrations.
//!
//! The order follows the Open Delivery shape. Only the fields the hub and the
//! built-in integrations read are modelled; everything else rides along in
//! [`Order::extra`] so integrations can still map the full document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monetary amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub value: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Delivery,
    Takeout,
    Indoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderTiming {
    Instant,
    Scheduled,
    Ondemand,
}

/// Merchant reference embedded in the order itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderMerchant {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub number: String,
    #[serde(default)]
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub orders_count_on_merchant: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotal {
    pub items_price: Price,
    pub other_fees: Price,
    pub discount: Price,
    pub order_amount: Price,
}

/// An order as received from the order-management service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub display_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_timing: Option<OrderTiming>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<OrderMerchant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<OrderTotal>,
    /// Remaining Open Delivery fields (items, payments, delivery, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Order {
    /// Creates an order carrying only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_id: String::new(),
            external_id: None,
            order_type: None,
            order_timing: None,
            created_at: None,
            merchant: None,
            customer: None,
            total: None,
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    pub state: String,
    pub city: String,
    #[serde(rename = "IBGEStateCode", default)]
    pub ibge_state_code: Option<String>,
    #[serde(rename = "IBGECityCode", default)]
    pub ibge_city_code: Option<String>,
    pub district: String,
    pub street: String,
    pub number: String,
    pub postal_code: String,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// The merchant (store) an order belongs to, as registered in the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: i64,
    pub address: Address,
    pub name: String,
    pub document: String,
    pub corporate_name: String,
    #[serde(default)]
    pub contact_emails: Vec<String>,
    pub commercial_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    Created,
    Confirmed,
    Dispatched,
    ReadyForPickup,
    PickupAreaAssigned,
    Delivered,
    Concluded,
    CancellationRequested,
    CancellationRequestDenied,
    Cancelled,
    OrderCancellationRequest,
    CancelledDenied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventCategory {
    OpenDelivery,
    OnlinePayment,
}

/// A status change recorded against an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    pub id: i64,
    pub public_id: String,
    #[serde(default)]
    pub external_id: Option<String>,
    pub event_type: OrderEventType,
    pub order_event_category: OrderEventCategory,
    pub order_id: i64,
    #[serde(default)]
    pub source_app_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything an order-output integration receives for one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationPayload {
    pub order: Order,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<Merchant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<OrderEvent>>,
}

impl IntegrationPayload {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            merchant: None,
            events: None,
        }
    }

    /// Returns true if any attached order event has the given type.
    pub fn has_event(&self, event_type: OrderEventType) -> bool {
        self.events
            .as_deref()
            .is_some_and(|events| events.iter().any(|e| e.event_type == event_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_keeps_unmodelled_fields() {
        let json = serde_json::json!({
            "id": "order123",
            "displayId": "0042",
            "type": "DELIVERY",
            "orderTiming": "SCHEDULED",
            "items": [{ "id": "i1", "quantity": 2 }],
            "sendTracking": true
        });

        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.id, "order123");
        assert_eq!(order.order_type, Some(OrderType::Delivery));
        assert_eq!(order.order_timing, Some(OrderTiming::Scheduled));
        assert!(order.extra.contains_key("items"));
        assert_eq!(order.extra["sendTracking"], serde_json::json!(true));

        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back["displayId"], "0042");
        assert_eq!(back["items"][0]["quantity"], 2);
    }

    #[test]
    fn payload_without_merchant_or_events() {
        let payload: IntegrationPayload =
            serde_json::from_value(serde_json::json!({ "order": { "id": "o1" } })).unwrap();
        assert_eq!(payload.order.id, "o1");
        assert!(payload.merchant.is_none());
        assert!(!payload.has_event(OrderEventType::Cancelled));
    }

    #[test]
    fn has_event_finds_cancellation() {
        let payload: IntegrationPayload = serde_json::from_value(serde_json::json!({
            "order": { "id": "o1" },
            "events": [{
                "id": 1,
                "publicId": "ev-1",
                "eventType": "CANCELLED",
                "orderEventCategory": "OPEN_DELIVERY",
                "orderId": 10,
                "createdAt": "2026-01-01T10:00:00Z",
                "updatedAt": "2026-01-01T10:00:00Z"
            }]
        }))
        .unwrap();

        assert!(payload.has_event(OrderEventType::Cancelled));
        assert!(!payload.has_event(OrderEventType::Delivered));
    }

    #[test]
    fn merchant_address_uses_ibge_names() {
        let merchant: Merchant = serde_json::from_value(serde_json::json!({
            "id": 7,
            "address": {
                "id": 1,
                "state": "SP",
                "city": "Campinas",
                "IBGEStateCode": "35",
                "IBGECityCode": null,
                "district": "Centro",
                "street": "Rua A",
                "number": "10",
                "postalCode": "13000-000",
                "complement": null,
                "reference": null,
                "latitude": -22.9,
                "longitude": -47.06
            },
            "name": "Loja",
            "document": "00.000.000/0001-00",
            "corporateName": "Loja LTDA",
            "contactEmails": ["a@loja.com"],
            "commercialNumber": "1999999999"
        }))
        .unwrap();

        assert_eq!(merchant.address.ibge_state_code.as_deref(), Some("35"));
        assert!(merchant.address.ibge_city_code.is_none());
    }
}
