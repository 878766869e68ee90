//! # Card Payments Service
//!
//! Authorizations, settlements, refunds, voids, and card verifications under
//! `/cardpayments/v1/accounts/{account}/…`.

use crate::cursor::Cursor;
use crate::services::{cancel_body, monitor_ready, ListFilter};
use crate::transport::{ApiRequest, SharedTransport};
use paygate_core::{
    Authorization, AuthorizationReversal, Entity, GatewayResult, Refund, RequestRules, Settlement,
    Verification,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Client for the card payments product line
pub struct CardPaymentService {
    transport: SharedTransport,
    account_number: String,
}

impl CardPaymentService {
    pub fn new(transport: SharedTransport, account_number: impl Into<String>) -> Self {
        Self {
            transport,
            account_number: account_number.into(),
        }
    }

    fn path(&self, suffix: &str) -> String {
        format!(
            "/cardpayments/v1/accounts/{}/{}",
            self.account_number, suffix
        )
    }

    // =========================================================================
    // Authorizations
    // =========================================================================

    /// Submit an authorization.
    ///
    /// Requires `merchantRefNum`, `amount`, and `card`.
    pub async fn authorize(&self, auth: &Authorization) -> GatewayResult<Authorization> {
        RequestRules::new()
            .require(&["merchantRefNum", "amount", "card"])
            .validate(auth.container())?;

        info!("submitting authorization");
        let request = ApiRequest::post(self.path("auths"), auth.to_json());
        let map = self.transport.execute(&request).await?;
        Authorization::from_json(&map)
    }

    /// Look up an authorization by gateway id
    pub async fn get_authorization(&self, id: &str) -> GatewayResult<Authorization> {
        debug!("fetching authorization {}", id);
        let request = ApiRequest::get(self.path(&format!("auths/{id}")));
        let map = self.transport.execute(&request).await?;
        Authorization::from_json(&map)
    }

    /// List authorizations, newest first
    pub async fn list_authorizations(
        &self,
        filter: &ListFilter,
    ) -> GatewayResult<Cursor<Authorization>> {
        let request = filter.apply(ApiRequest::get(self.path("auths")));
        let map = self.transport.execute(&request).await?;
        Cursor::parse(Arc::clone(&self.transport), &map)
    }

    /// Reverse an unsettled authorization, in full or in part.
    ///
    /// Requires `merchantRefNum` and `amount`.
    pub async fn void_authorization(
        &self,
        auth_id: &str,
        reversal: &AuthorizationReversal,
    ) -> GatewayResult<AuthorizationReversal> {
        RequestRules::new()
            .require(&["merchantRefNum", "amount"])
            .validate(reversal.container())?;

        info!("voiding authorization {}", auth_id);
        let request = ApiRequest::post(
            self.path(&format!("auths/{auth_id}/voidauths")),
            reversal.to_json(),
        );
        let map = self.transport.execute(&request).await?;
        AuthorizationReversal::from_json(&map)
    }

    // =========================================================================
    // Settlements
    // =========================================================================

    /// Settle a completed authorization.
    ///
    /// Requires `merchantRefNum`; an absent `amount` settles the full
    /// available balance.
    pub async fn settle_authorization(
        &self,
        auth_id: &str,
        settlement: &Settlement,
    ) -> GatewayResult<Settlement> {
        RequestRules::new()
            .require(&["merchantRefNum"])
            .optional(&["amount"])
            .validate(settlement.container())?;

        info!("settling authorization {}", auth_id);
        let request = ApiRequest::post(
            self.path(&format!("auths/{auth_id}/settlements")),
            settlement.to_json(),
        );
        let map = self.transport.execute(&request).await?;
        Settlement::from_json(&map)
    }

    /// Look up a settlement by gateway id
    pub async fn get_settlement(&self, id: &str) -> GatewayResult<Settlement> {
        debug!("fetching settlement {}", id);
        let request = ApiRequest::get(self.path(&format!("settlements/{id}")));
        let map = self.transport.execute(&request).await?;
        Settlement::from_json(&map)
    }

    /// List settlements, newest first
    pub async fn list_settlements(&self, filter: &ListFilter) -> GatewayResult<Cursor<Settlement>> {
        let request = filter.apply(ApiRequest::get(self.path("settlements")));
        let map = self.transport.execute(&request).await?;
        Cursor::parse(Arc::clone(&self.transport), &map)
    }

    /// Cancel a settlement that has not yet been batched
    pub async fn cancel_settlement(&self, id: &str) -> GatewayResult<Settlement> {
        info!("cancelling settlement {}", id);
        let request = ApiRequest::put(self.path(&format!("settlements/{id}")), cancel_body());
        let map = self.transport.execute(&request).await?;
        Settlement::from_json(&map)
    }

    // =========================================================================
    // Refunds
    // =========================================================================

    /// Refund a settled payment, in full or in part.
    ///
    /// Requires `merchantRefNum`; an absent `amount` refunds the full
    /// refundable balance.
    pub async fn refund_settlement(
        &self,
        settlement_id: &str,
        refund: &Refund,
    ) -> GatewayResult<Refund> {
        RequestRules::new()
            .require(&["merchantRefNum"])
            .optional(&["amount"])
            .validate(refund.container())?;

        info!("refunding settlement {}", settlement_id);
        let request = ApiRequest::post(
            self.path(&format!("settlements/{settlement_id}/refunds")),
            refund.to_json(),
        );
        let map = self.transport.execute(&request).await?;
        Refund::from_json(&map)
    }

    /// Look up a refund by gateway id
    pub async fn get_refund(&self, id: &str) -> GatewayResult<Refund> {
        debug!("fetching refund {}", id);
        let request = ApiRequest::get(self.path(&format!("refunds/{id}")));
        let map = self.transport.execute(&request).await?;
        Refund::from_json(&map)
    }

    /// List refunds, newest first
    pub async fn list_refunds(&self, filter: &ListFilter) -> GatewayResult<Cursor<Refund>> {
        let request = filter.apply(ApiRequest::get(self.path("refunds")));
        let map = self.transport.execute(&request).await?;
        Cursor::parse(Arc::clone(&self.transport), &map)
    }

    /// Cancel a refund that has not yet been batched
    pub async fn cancel_refund(&self, id: &str) -> GatewayResult<Refund> {
        info!("cancelling refund {}", id);
        let request = ApiRequest::put(self.path(&format!("refunds/{id}")), cancel_body());
        let map = self.transport.execute(&request).await?;
        Refund::from_json(&map)
    }

    // =========================================================================
    // Verifications
    // =========================================================================

    /// Verify a card without holding funds.
    ///
    /// Requires `merchantRefNum` and `card`.
    pub async fn verify_card(&self, verification: &Verification) -> GatewayResult<Verification> {
        RequestRules::new()
            .require(&["merchantRefNum", "card"])
            .validate(verification.container())?;

        info!("submitting card verification");
        let request = ApiRequest::post(self.path("verifications"), verification.to_json());
        let map = self.transport.execute(&request).await?;
        Verification::from_json(&map)
    }

    /// Look up a verification by gateway id
    pub async fn get_verification(&self, id: &str) -> GatewayResult<Verification> {
        debug!("fetching verification {}", id);
        let request = ApiRequest::get(self.path(&format!("verifications/{id}")));
        let map = self.transport.execute(&request).await?;
        Verification::from_json(&map)
    }

    /// List verifications, newest first
    pub async fn list_verifications(
        &self,
        filter: &ListFilter,
    ) -> GatewayResult<Cursor<Verification>> {
        let request = filter.apply(ApiRequest::get(self.path("verifications")));
        let map = self.transport.execute(&request).await?;
        Cursor::parse(Arc::clone(&self.transport), &map)
    }

    // =========================================================================
    // Monitor
    // =========================================================================

    /// True iff the card payments API reports itself ready
    pub async fn monitor(&self) -> GatewayResult<bool> {
        let request = ApiRequest::get("/cardpayments/monitor");
        let map = self.transport.execute(&request).await?;
        Ok(monitor_ready(&map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{as_transport, MockTransport};
    use crate::transport::Method;
    use paygate_core::GatewayError;
    use serde_json::json;

    const ACCOUNT: &str = "1001234567";

    fn service(mock: &std::sync::Arc<MockTransport>) -> CardPaymentService {
        CardPaymentService::new(as_transport(mock), ACCOUNT)
    }

    #[tokio::test]
    async fn test_authorize_posts_to_auths() {
        let mock = MockTransport::shared(vec![json!({
            "id": "auth-1", "merchantRefNum": "order-1001", "amount": 500,
            "status": "COMPLETED"
        })]);

        let mut builder = Authorization::builder()
            .merchant_ref_num("order-1001")
            .amount(500);
        builder.card().card_num("4111111111111111").cvv("123").done();
        let auth = builder.build().unwrap();

        let response = service(&mock).authorize(&auth).await.unwrap();
        assert_eq!(response.id().unwrap(), Some("auth-1"));
        assert_eq!(response.status().unwrap(), Some("COMPLETED"));

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(
            requests[0].path,
            "/cardpayments/v1/accounts/1001234567/auths"
        );
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body["amount"], json!(500));
        assert_eq!(body["card"]["cardNum"], json!("4111111111111111"));
    }

    #[tokio::test]
    async fn test_authorize_rejects_incomplete_request_without_io() {
        let mock = MockTransport::shared(vec![]);

        // no card, no amount
        let auth = Authorization::builder()
            .merchant_ref_num("order-1001")
            .build()
            .unwrap();

        match service(&mock).authorize(&auth).await {
            Err(GatewayError::Validation { missing }) => {
                assert_eq!(missing, vec!["amount".to_string(), "card".to_string()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_settle_then_cancel_settlement() {
        let mock = MockTransport::shared(vec![
            json!({ "id": "stl-1", "merchantRefNum": "order-1001", "status": "PENDING" }),
            json!({ "id": "stl-1", "status": "CANCELLED" }),
        ]);
        let service = service(&mock);

        let settlement = Settlement::builder()
            .merchant_ref_num("order-1001")
            .build()
            .unwrap();
        let submitted = service.settle_authorization("auth-1", &settlement).await.unwrap();
        assert_eq!(submitted.status().unwrap(), Some("PENDING"));

        let cancelled = service.cancel_settlement("stl-1").await.unwrap();
        assert_eq!(cancelled.status().unwrap(), Some("CANCELLED"));

        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(
            requests[0].path,
            "/cardpayments/v1/accounts/1001234567/auths/auth-1/settlements"
        );
        assert_eq!(requests[1].method, Method::Put);
        assert_eq!(
            requests[1].path,
            "/cardpayments/v1/accounts/1001234567/settlements/stl-1"
        );
        assert_eq!(
            requests[1].body.as_ref().unwrap()["status"],
            json!("CANCELLED")
        );
    }

    #[tokio::test]
    async fn test_void_posts_reversal_under_auth() {
        let mock = MockTransport::shared(vec![json!({
            "id": "void-1", "merchantRefNum": "order-1001", "amount": 500,
            "status": "COMPLETED"
        })]);

        let reversal = AuthorizationReversal::builder()
            .merchant_ref_num("order-1001")
            .amount(500)
            .build()
            .unwrap();
        let voided = service(&mock).void_authorization("auth-1", &reversal).await.unwrap();
        assert_eq!(voided.id().unwrap(), Some("void-1"));

        let requests = mock.requests();
        assert_eq!(
            requests[0].path,
            "/cardpayments/v1/accounts/1001234567/auths/auth-1/voidauths"
        );
    }

    #[tokio::test]
    async fn test_refund_requires_merchant_ref_num() {
        let mock = MockTransport::shared(vec![]);
        let refund = Refund::builder().amount(100).build().unwrap();

        match service(&mock).refund_settlement("stl-1", &refund).await {
            Err(GatewayError::Validation { missing }) => {
                assert_eq!(missing, vec!["merchantRefNum".to_string()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_authorizations_returns_cursor_with_filter() {
        let mock = MockTransport::shared(vec![json!({
            "auths": [ { "id": "a1", "amount": 500 } ],
            "links": [ { "rel": "next", "href": "/v1/auths?offset=10" } ]
        })]);

        let filter = ListFilter::new().with_limit(10).with_merchant_ref_num("order-1001");
        let cursor = service(&mock).list_authorizations(&filter).await.unwrap();
        assert_eq!(cursor.results().len(), 1);
        assert!(cursor.has_next());

        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(
            requests[0].path,
            "/cardpayments/v1/accounts/1001234567/auths"
        );
        assert!(requests[0]
            .query
            .contains(&("merchantRefNum".to_string(), "order-1001".to_string())));
        assert!(requests[0].query.contains(&("limit".to_string(), "10".to_string())));
    }

    #[tokio::test]
    async fn test_verify_card_posts_to_verifications() {
        let mock = MockTransport::shared(vec![json!({
            "id": "ver-1", "status": "COMPLETED", "cvvVerification": "MATCH"
        })]);

        let mut builder = Verification::builder().merchant_ref_num("order-1001");
        builder.card().card_num("4111111111111111").done();
        let verification = builder.build().unwrap();

        let result = service(&mock).verify_card(&verification).await.unwrap();
        assert_eq!(result.cvv_verification().unwrap(), Some("MATCH"));
        assert_eq!(
            mock.requests()[0].path,
            "/cardpayments/v1/accounts/1001234567/verifications"
        );
    }

    #[tokio::test]
    async fn test_monitor() {
        let mock = MockTransport::shared(vec![
            json!({ "status": "READY" }),
            json!({ "status": "DOWN" }),
        ]);
        let service = service(&mock);

        assert!(service.monitor().await.unwrap());
        assert!(!service.monitor().await.unwrap());
        assert_eq!(mock.requests()[0].path, "/cardpayments/monitor");
    }
}
