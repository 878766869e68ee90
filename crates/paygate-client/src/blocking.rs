//! # Blocking Facade
//!
//! Method-for-method synchronous mirrors of the async services for callers
//! without a tokio runtime of their own. [`BlockingClient`] owns a
//! current-thread runtime and blocks on each call; behavior is otherwise
//! identical to the async forms.

use crate::config::GatewayConfig;
use crate::cursor::Cursor;
use crate::services::{CardPaymentService, CustomerVaultService, DirectDebitService, ListFilter};
use crate::transport::SharedTransport;
use crate::GatewayClient;
use paygate_core::{
    Address, Authorization, AuthorizationReversal, Card, GatewayError, GatewayResult, Pageable,
    Profile, Purchase, Refund, Settlement, StandaloneCredit, Verification,
};
use tokio::runtime::Runtime;

/// Blocking entry point: one transport, one runtime, three services
pub struct BlockingClient {
    client: GatewayClient,
    runtime: Runtime,
}

impl BlockingClient {
    /// Build a blocking client over the default HTTP transport
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        Self::wrap(GatewayClient::new(config))
    }

    /// Build a blocking client from the `PAYGATE_*` environment variables
    pub fn from_env() -> GatewayResult<Self> {
        Self::wrap(GatewayClient::from_env()?)
    }

    /// Build a blocking client over a caller-supplied transport
    pub fn with_transport(
        transport: SharedTransport,
        account_number: impl Into<String>,
    ) -> GatewayResult<Self> {
        Self::wrap(GatewayClient::with_transport(transport, account_number))
    }

    fn wrap(client: GatewayClient) -> GatewayResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GatewayError::Configuration(format!("failed to start runtime: {e}")))?;
        Ok(Self { client, runtime })
    }

    /// Card payments: authorizations, settlements, refunds, verifications
    pub fn card_payments(&self) -> BlockingCardPayments<'_> {
        BlockingCardPayments {
            runtime: &self.runtime,
            service: self.client.card_payments(),
        }
    }

    /// Customer vault: stored profiles, addresses, and cards
    pub fn customer_vault(&self) -> BlockingCustomerVault<'_> {
        BlockingCustomerVault {
            runtime: &self.runtime,
            service: self.client.customer_vault(),
        }
    }

    /// Direct debit: bank-account purchases and standalone credits
    pub fn direct_debit(&self) -> BlockingDirectDebit<'_> {
        BlockingDirectDebit {
            runtime: &self.runtime,
            service: self.client.direct_debit(),
        }
    }

    /// Blocking mirror of [`Cursor::next_page`]
    pub fn next_page<T: Pageable>(&self, cursor: &Cursor<T>) -> GatewayResult<Cursor<T>> {
        self.runtime.block_on(cursor.next_page())
    }

    /// Blocking mirror of [`Cursor::previous_page`]
    pub fn previous_page<T: Pageable>(&self, cursor: &Cursor<T>) -> GatewayResult<Cursor<T>> {
        self.runtime.block_on(cursor.previous_page())
    }
}

/// Blocking mirror of [`CardPaymentService`]
pub struct BlockingCardPayments<'a> {
    runtime: &'a Runtime,
    service: CardPaymentService,
}

impl BlockingCardPayments<'_> {
    pub fn authorize(&self, auth: &Authorization) -> GatewayResult<Authorization> {
        self.runtime.block_on(self.service.authorize(auth))
    }

    pub fn get_authorization(&self, id: &str) -> GatewayResult<Authorization> {
        self.runtime.block_on(self.service.get_authorization(id))
    }

    pub fn list_authorizations(&self, filter: &ListFilter) -> GatewayResult<Cursor<Authorization>> {
        self.runtime.block_on(self.service.list_authorizations(filter))
    }

    pub fn void_authorization(
        &self,
        auth_id: &str,
        reversal: &AuthorizationReversal,
    ) -> GatewayResult<AuthorizationReversal> {
        self.runtime
            .block_on(self.service.void_authorization(auth_id, reversal))
    }

    pub fn settle_authorization(
        &self,
        auth_id: &str,
        settlement: &Settlement,
    ) -> GatewayResult<Settlement> {
        self.runtime
            .block_on(self.service.settle_authorization(auth_id, settlement))
    }

    pub fn get_settlement(&self, id: &str) -> GatewayResult<Settlement> {
        self.runtime.block_on(self.service.get_settlement(id))
    }

    pub fn list_settlements(&self, filter: &ListFilter) -> GatewayResult<Cursor<Settlement>> {
        self.runtime.block_on(self.service.list_settlements(filter))
    }

    pub fn cancel_settlement(&self, id: &str) -> GatewayResult<Settlement> {
        self.runtime.block_on(self.service.cancel_settlement(id))
    }

    pub fn refund_settlement(&self, settlement_id: &str, refund: &Refund) -> GatewayResult<Refund> {
        self.runtime
            .block_on(self.service.refund_settlement(settlement_id, refund))
    }

    pub fn get_refund(&self, id: &str) -> GatewayResult<Refund> {
        self.runtime.block_on(self.service.get_refund(id))
    }

    pub fn list_refunds(&self, filter: &ListFilter) -> GatewayResult<Cursor<Refund>> {
        self.runtime.block_on(self.service.list_refunds(filter))
    }

    pub fn cancel_refund(&self, id: &str) -> GatewayResult<Refund> {
        self.runtime.block_on(self.service.cancel_refund(id))
    }

    pub fn verify_card(&self, verification: &Verification) -> GatewayResult<Verification> {
        self.runtime.block_on(self.service.verify_card(verification))
    }

    pub fn get_verification(&self, id: &str) -> GatewayResult<Verification> {
        self.runtime.block_on(self.service.get_verification(id))
    }

    pub fn list_verifications(&self, filter: &ListFilter) -> GatewayResult<Cursor<Verification>> {
        self.runtime.block_on(self.service.list_verifications(filter))
    }

    pub fn monitor(&self) -> GatewayResult<bool> {
        self.runtime.block_on(self.service.monitor())
    }
}

/// Blocking mirror of [`CustomerVaultService`]
pub struct BlockingCustomerVault<'a> {
    runtime: &'a Runtime,
    service: CustomerVaultService,
}

impl BlockingCustomerVault<'_> {
    pub fn create_profile(&self, profile: &Profile) -> GatewayResult<Profile> {
        self.runtime.block_on(self.service.create_profile(profile))
    }

    pub fn get_profile(&self, id: &str) -> GatewayResult<Profile> {
        self.runtime.block_on(self.service.get_profile(id))
    }

    pub fn update_profile(&self, id: &str, profile: &Profile) -> GatewayResult<Profile> {
        self.runtime.block_on(self.service.update_profile(id, profile))
    }

    pub fn delete_profile(&self, id: &str) -> GatewayResult<()> {
        self.runtime.block_on(self.service.delete_profile(id))
    }

    pub fn create_address(&self, profile_id: &str, address: &Address) -> GatewayResult<Address> {
        self.runtime
            .block_on(self.service.create_address(profile_id, address))
    }

    pub fn get_address(&self, profile_id: &str, id: &str) -> GatewayResult<Address> {
        self.runtime.block_on(self.service.get_address(profile_id, id))
    }

    pub fn update_address(
        &self,
        profile_id: &str,
        id: &str,
        address: &Address,
    ) -> GatewayResult<Address> {
        self.runtime
            .block_on(self.service.update_address(profile_id, id, address))
    }

    pub fn delete_address(&self, profile_id: &str, id: &str) -> GatewayResult<()> {
        self.runtime
            .block_on(self.service.delete_address(profile_id, id))
    }

    pub fn create_card(&self, profile_id: &str, card: &Card) -> GatewayResult<Card> {
        self.runtime.block_on(self.service.create_card(profile_id, card))
    }

    pub fn get_card(&self, profile_id: &str, id: &str) -> GatewayResult<Card> {
        self.runtime.block_on(self.service.get_card(profile_id, id))
    }

    pub fn update_card(&self, profile_id: &str, id: &str, card: &Card) -> GatewayResult<Card> {
        self.runtime
            .block_on(self.service.update_card(profile_id, id, card))
    }

    pub fn delete_card(&self, profile_id: &str, id: &str) -> GatewayResult<()> {
        self.runtime.block_on(self.service.delete_card(profile_id, id))
    }

    pub fn monitor(&self) -> GatewayResult<bool> {
        self.runtime.block_on(self.service.monitor())
    }
}

/// Blocking mirror of [`DirectDebitService`]
pub struct BlockingDirectDebit<'a> {
    runtime: &'a Runtime,
    service: DirectDebitService,
}

impl BlockingDirectDebit<'_> {
    pub fn submit_purchase(&self, purchase: &Purchase) -> GatewayResult<Purchase> {
        self.runtime.block_on(self.service.submit_purchase(purchase))
    }

    pub fn get_purchase(&self, id: &str) -> GatewayResult<Purchase> {
        self.runtime.block_on(self.service.get_purchase(id))
    }

    pub fn list_purchases(&self, filter: &ListFilter) -> GatewayResult<Cursor<Purchase>> {
        self.runtime.block_on(self.service.list_purchases(filter))
    }

    pub fn cancel_purchase(&self, id: &str) -> GatewayResult<Purchase> {
        self.runtime.block_on(self.service.cancel_purchase(id))
    }

    pub fn submit_standalone_credit(
        &self,
        credit: &StandaloneCredit,
    ) -> GatewayResult<StandaloneCredit> {
        self.runtime
            .block_on(self.service.submit_standalone_credit(credit))
    }

    pub fn get_standalone_credit(&self, id: &str) -> GatewayResult<StandaloneCredit> {
        self.runtime.block_on(self.service.get_standalone_credit(id))
    }

    pub fn list_standalone_credits(
        &self,
        filter: &ListFilter,
    ) -> GatewayResult<Cursor<StandaloneCredit>> {
        self.runtime
            .block_on(self.service.list_standalone_credits(filter))
    }

    pub fn cancel_standalone_credit(&self, id: &str) -> GatewayResult<StandaloneCredit> {
        self.runtime.block_on(self.service.cancel_standalone_credit(id))
    }

    pub fn monitor(&self) -> GatewayResult<bool> {
        self.runtime.block_on(self.service.monitor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{as_transport, MockTransport};
    use serde_json::json;

    #[test]
    fn test_blocking_calls_mirror_async_behavior() {
        let mock = MockTransport::shared(vec![json!({
            "id": "auth-1", "merchantRefNum": "order-1001", "amount": 500,
            "status": "COMPLETED"
        })]);
        let client = BlockingClient::with_transport(as_transport(&mock), "1001234567").unwrap();

        let mut builder = Authorization::builder()
            .merchant_ref_num("order-1001")
            .amount(500);
        builder.card().card_num("4111111111111111").done();
        let auth = builder.build().unwrap();

        let response = client.card_payments().authorize(&auth).unwrap();
        assert_eq!(response.id().unwrap(), Some("auth-1"));
        assert_eq!(
            mock.requests()[0].path,
            "/cardpayments/v1/accounts/1001234567/auths"
        );
    }

    #[test]
    fn test_blocking_pagination() {
        let mock = MockTransport::shared(vec![
            json!({
                "auths": [ { "id": "a1", "amount": 500 } ],
                "links": [ { "rel": "next", "href": "/v1/auths?offset=10" } ]
            }),
            json!({ "auths": [ { "id": "a2", "amount": 900 } ] }),
        ]);
        let client = BlockingClient::with_transport(as_transport(&mock), "1001234567").unwrap();

        let page = client
            .card_payments()
            .list_authorizations(&ListFilter::new())
            .unwrap();
        assert!(page.has_next());

        let next = client.next_page(&page).unwrap();
        assert_eq!(next.results()[0].id().unwrap(), Some("a2"));
        assert!(!next.has_next());
        assert!(matches!(
            client.next_page(&next),
            Err(GatewayError::State(_))
        ));
    }

    #[test]
    fn test_validation_fails_without_io() {
        let mock = MockTransport::shared(vec![]);
        let client = BlockingClient::with_transport(as_transport(&mock), "1001234567").unwrap();

        let auth = Authorization::builder().amount(500).build().unwrap();
        assert!(matches!(
            client.card_payments().authorize(&auth),
            Err(GatewayError::Validation { .. })
        ));
        assert!(mock.requests().is_empty());
    }
}
