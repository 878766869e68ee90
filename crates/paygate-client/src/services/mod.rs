//! # Gateway Services
//!
//! One service per gateway product line. A service owns nothing but a shared
//! transport handle and the merchant account number; every call validates the
//! operation's field requirements, assembles a method/path/query/body tuple,
//! and hands it to the transport.

use crate::transport::ApiRequest;
use serde_json::{Map as JsonMap, Value as JsonValue};

pub mod card;
pub mod debit;
pub mod vault;

pub use card::CardPaymentService;
pub use debit::DirectDebitService;
pub use vault::CustomerVaultService;

/// Query parameters accepted by the gateway's list endpoints
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    merchant_ref_num: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict results to one merchant reference number
    pub fn with_merchant_ref_num(mut self, value: impl Into<String>) -> Self {
        self.merchant_ref_num = Some(value.into());
        self
    }

    /// Builder: page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Builder: starting offset
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(merchant_ref_num) = &self.merchant_ref_num {
            request = request.with_query("merchantRefNum", merchant_ref_num);
        }
        if let Some(limit) = self.limit {
            request = request.with_query("limit", limit.to_string());
        }
        if let Some(offset) = self.offset {
            request = request.with_query("offset", offset.to_string());
        }
        request
    }
}

/// Body shared by every cancel operation
pub(crate) fn cancel_body() -> JsonMap<String, JsonValue> {
    let mut body = JsonMap::new();
    body.insert("status".to_string(), JsonValue::String("CANCELLED".to_string()));
    body
}

/// A monitor endpoint reports ready iff `status == "READY"`
pub(crate) fn monitor_ready(map: &JsonMap<String, JsonValue>) -> bool {
    map.get("status").and_then(JsonValue::as_str) == Some("READY")
}
