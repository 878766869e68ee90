//! # paygate-client
//!
//! Async HTTP client for the payment gateway REST API, over the typed object
//! model in `paygate-core`.
//!
//! The entry point is [`GatewayClient`]: it owns the HTTP transport and hands
//! out one service per product line (card payments, customer vault, direct
//! debit). List operations return a [`Cursor`] that follows the gateway's
//! pagination links. For callers without an async runtime there is a
//! [`blocking::BlockingClient`] with method-for-method mirrors.
//!
//! ## Example
//!
//! ```rust,no_run
//! use paygate_client::{GatewayClient, GatewayConfig, ListFilter};
//! use paygate_core::Authorization;
//!
//! # async fn run() -> Result<(), paygate_core::GatewayError> {
//! let client = GatewayClient::new(GatewayConfig::from_env()?);
//! let cards = client.card_payments();
//!
//! let mut builder = Authorization::builder()
//!     .merchant_ref_num("order-1001")
//!     .amount(500)
//!     .settle_with_auth(true);
//! builder.card().card_num("4111111111111111").cvv("123").done();
//!
//! let auth = cards.authorize(&builder.build()?).await?;
//! println!("authorization {:?}", auth.id()?);
//!
//! let mut page = cards.list_authorizations(&ListFilter::new().with_limit(10)).await?;
//! while page.has_next() {
//!     page = page.next_page().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod config;
pub mod cursor;
pub mod services;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

use paygate_core::GatewayResult;
use std::sync::Arc;

// Re-exports for convenience
pub use config::{Environment, GatewayConfig};
pub use cursor::Cursor;
pub use services::{CardPaymentService, CustomerVaultService, DirectDebitService, ListFilter};
pub use transport::{ApiRequest, HttpTransport, Method, SharedTransport, Transport};

/// Entry point for the SDK: one transport, three services
pub struct GatewayClient {
    transport: SharedTransport,
    account_number: String,
}

impl GatewayClient {
    /// Build a client over the default HTTP transport
    pub fn new(config: GatewayConfig) -> Self {
        let account_number = config.account_number.clone();
        Self {
            transport: Arc::new(HttpTransport::new(config)),
            account_number,
        }
    }

    /// Build a client from the `PAYGATE_*` environment variables
    pub fn from_env() -> GatewayResult<Self> {
        Ok(Self::new(GatewayConfig::from_env()?))
    }

    /// Build a client over a caller-supplied transport
    pub fn with_transport(transport: SharedTransport, account_number: impl Into<String>) -> Self {
        Self {
            transport,
            account_number: account_number.into(),
        }
    }

    /// Card payments: authorizations, settlements, refunds, verifications
    pub fn card_payments(&self) -> CardPaymentService {
        CardPaymentService::new(Arc::clone(&self.transport), self.account_number.clone())
    }

    /// Customer vault: stored profiles, addresses, and cards
    pub fn customer_vault(&self) -> CustomerVaultService {
        CustomerVaultService::new(Arc::clone(&self.transport))
    }

    /// Direct debit: bank-account purchases and standalone credits
    pub fn direct_debit(&self) -> DirectDebitService {
        DirectDebitService::new(Arc::clone(&self.transport), self.account_number.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{as_transport, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_services_share_the_client_transport() {
        let mock = MockTransport::shared(vec![
            json!({ "status": "READY" }),
            json!({ "status": "READY" }),
        ]);
        let client = GatewayClient::with_transport(as_transport(&mock), "1001234567");

        assert!(client.card_payments().monitor().await.unwrap());
        assert!(client.direct_debit().monitor().await.unwrap());
        assert_eq!(mock.requests().len(), 2);
    }
}
