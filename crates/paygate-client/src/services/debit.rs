//! # Direct Debit Service
//!
//! Bank-account purchases and standalone credits under
//! `/directdebit/v1/accounts/{account}/…`.

use crate::cursor::Cursor;
use crate::services::{cancel_body, monitor_ready, ListFilter};
use crate::transport::{ApiRequest, SharedTransport};
use paygate_core::{Entity, GatewayResult, Purchase, RequestRules, StandaloneCredit};
use std::sync::Arc;
use tracing::{debug, info};

/// Client for the direct debit product line
pub struct DirectDebitService {
    transport: SharedTransport,
    account_number: String,
}

impl DirectDebitService {
    pub fn new(transport: SharedTransport, account_number: impl Into<String>) -> Self {
        Self {
            transport,
            account_number: account_number.into(),
        }
    }

    fn path(&self, suffix: &str) -> String {
        format!("/directdebit/v1/accounts/{}/{}", self.account_number, suffix)
    }

    fn debit_rules() -> RequestRules {
        RequestRules::new()
            .require(&["merchantRefNum", "amount", "ach"])
            .optional(&["customerIp", "billingDetails"])
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    /// Submit a purchase (pull funds from a bank account).
    ///
    /// Requires `merchantRefNum`, `amount`, and `ach`.
    pub async fn submit_purchase(&self, purchase: &Purchase) -> GatewayResult<Purchase> {
        Self::debit_rules().validate(purchase.container())?;

        info!("submitting direct debit purchase");
        let request = ApiRequest::post(self.path("purchases"), purchase.to_json());
        let map = self.transport.execute(&request).await?;
        Purchase::from_json(&map)
    }

    /// Look up a purchase by gateway id
    pub async fn get_purchase(&self, id: &str) -> GatewayResult<Purchase> {
        debug!("fetching purchase {}", id);
        let request = ApiRequest::get(self.path(&format!("purchases/{id}")));
        let map = self.transport.execute(&request).await?;
        Purchase::from_json(&map)
    }

    /// List purchases, newest first
    pub async fn list_purchases(&self, filter: &ListFilter) -> GatewayResult<Cursor<Purchase>> {
        let request = filter.apply(ApiRequest::get(self.path("purchases")));
        let map = self.transport.execute(&request).await?;
        Cursor::parse(Arc::clone(&self.transport), &map)
    }

    /// Cancel a purchase that has not yet been batched
    pub async fn cancel_purchase(&self, id: &str) -> GatewayResult<Purchase> {
        info!("cancelling purchase {}", id);
        let request = ApiRequest::put(self.path(&format!("purchases/{id}")), cancel_body());
        let map = self.transport.execute(&request).await?;
        Purchase::from_json(&map)
    }

    // =========================================================================
    // Standalone credits
    // =========================================================================

    /// Submit a standalone credit (push funds to a bank account).
    ///
    /// Requires `merchantRefNum`, `amount`, and `ach`.
    pub async fn submit_standalone_credit(
        &self,
        credit: &StandaloneCredit,
    ) -> GatewayResult<StandaloneCredit> {
        Self::debit_rules().validate(credit.container())?;

        info!("submitting standalone credit");
        let request = ApiRequest::post(self.path("standalonecredits"), credit.to_json());
        let map = self.transport.execute(&request).await?;
        StandaloneCredit::from_json(&map)
    }

    /// Look up a standalone credit by gateway id
    pub async fn get_standalone_credit(&self, id: &str) -> GatewayResult<StandaloneCredit> {
        debug!("fetching standalone credit {}", id);
        let request = ApiRequest::get(self.path(&format!("standalonecredits/{id}")));
        let map = self.transport.execute(&request).await?;
        StandaloneCredit::from_json(&map)
    }

    /// List standalone credits, newest first
    pub async fn list_standalone_credits(
        &self,
        filter: &ListFilter,
    ) -> GatewayResult<Cursor<StandaloneCredit>> {
        let request = filter.apply(ApiRequest::get(self.path("standalonecredits")));
        let map = self.transport.execute(&request).await?;
        Cursor::parse(Arc::clone(&self.transport), &map)
    }

    /// Cancel a standalone credit that has not yet been batched
    pub async fn cancel_standalone_credit(&self, id: &str) -> GatewayResult<StandaloneCredit> {
        info!("cancelling standalone credit {}", id);
        let request = ApiRequest::put(self.path(&format!("standalonecredits/{id}")), cancel_body());
        let map = self.transport.execute(&request).await?;
        StandaloneCredit::from_json(&map)
    }

    // =========================================================================
    // Monitor
    // =========================================================================

    /// True iff the direct debit API reports itself ready
    pub async fn monitor(&self) -> GatewayResult<bool> {
        let request = ApiRequest::get("/directdebit/monitor");
        let map = self.transport.execute(&request).await?;
        Ok(monitor_ready(&map))
    }
}
