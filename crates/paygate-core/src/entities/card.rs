//! # Card Payment Entities
//!
//! Authorizations, settlements, refunds, authorization reversals, and card
//! verifications, plus the card block shared with the customer vault.

use crate::builder::ContainerBuilder;
use crate::entities::common::{
    BillingDetailsSection, ErrorBody, Link, BILLING_DETAILS_SCHEMA, ERROR_SCHEMA, LINK_FIELD,
};
use crate::entities::vault::{ProfileSection, PROFILE_SCHEMA};
use crate::entities::{
    builder_setters, entity_getters, gateway_entity, BillingDetails, Entity, Pageable, Profile,
};
use crate::error::GatewayResult;
use crate::schema::{FieldType, Schema};

pub static AUTH_STATUSES: &[&str] = &["RECEIVED", "COMPLETED", "HELD", "FAILED", "CANCELLED"];

pub static SETTLEMENT_STATUSES: &[&str] = &[
    "RECEIVED",
    "INITIATED",
    "PENDING",
    "COMPLETED",
    "FAILED",
    "CANCELLED",
];

pub static VERIFICATION_STATUSES: &[&str] = &["RECEIVED", "COMPLETED", "FAILED"];

pub static CARD_TYPES: &[&str] = &["AM", "DC", "DI", "JC", "MC", "MD", "SO", "VI", "VD", "VE"];

pub static CARD_STATUSES: &[&str] = &["ACTIVE"];

pub static AVS_RESPONSES: &[&str] = &[
    "MATCH",
    "MATCH_ADDRESS_ONLY",
    "MATCH_ZIP_ONLY",
    "NO_MATCH",
    "NOT_PROCESSED",
    "UNKNOWN",
];

pub static CVV_VERIFICATIONS: &[&str] = &["MATCH", "NO_MATCH", "NOT_PROCESSED", "UNKNOWN"];

pub static CARD_EXPIRY_SCHEMA: Schema = Schema {
    name: "CardExpiry",
    fields: &[("month", FieldType::Int), ("year", FieldType::Int)],
};

pub static CARD_SCHEMA: Schema = Schema {
    name: "Card",
    fields: &[
        ("id", FieldType::Str),
        ("nickName", FieldType::Str),
        ("holderName", FieldType::Str),
        ("cardNum", FieldType::Str),
        ("lastDigits", FieldType::Str),
        ("cardExpiry", FieldType::Object(&CARD_EXPIRY_SCHEMA)),
        ("cardType", FieldType::Enum(CARD_TYPES)),
        ("cvv", FieldType::Str),
        ("billingAddressId", FieldType::Str),
        ("paymentToken", FieldType::Str),
        ("singleUseToken", FieldType::Str),
        ("status", FieldType::Enum(CARD_STATUSES)),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

pub static SETTLEMENT_SCHEMA: Schema = Schema {
    name: "Settlement",
    fields: &[
        ("id", FieldType::Str),
        ("merchantRefNum", FieldType::Str),
        ("amount", FieldType::Int),
        ("availableToRefund", FieldType::Int),
        ("txnTime", FieldType::DateTime),
        ("status", FieldType::Enum(SETTLEMENT_STATUSES)),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

static SETTLEMENT_FIELD: FieldType = FieldType::Object(&SETTLEMENT_SCHEMA);

pub static AUTHORIZATION_SCHEMA: Schema = Schema {
    name: "Authorization",
    fields: &[
        ("id", FieldType::Str),
        ("merchantRefNum", FieldType::Str),
        ("amount", FieldType::Int),
        ("settleWithAuth", FieldType::Bool),
        ("availableToSettle", FieldType::Int),
        ("currencyCode", FieldType::Str),
        ("customerIp", FieldType::Str),
        ("description", FieldType::Str),
        ("authCode", FieldType::Str),
        ("txnTime", FieldType::DateTime),
        ("status", FieldType::Enum(AUTH_STATUSES)),
        ("avsResponse", FieldType::Enum(AVS_RESPONSES)),
        ("cvvVerification", FieldType::Enum(CVV_VERIFICATIONS)),
        ("card", FieldType::Object(&CARD_SCHEMA)),
        ("profile", FieldType::Object(&PROFILE_SCHEMA)),
        ("billingDetails", FieldType::Object(&BILLING_DETAILS_SCHEMA)),
        ("settlements", FieldType::List(&SETTLEMENT_FIELD)),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

pub static REFUND_SCHEMA: Schema = Schema {
    name: "Refund",
    fields: &[
        ("id", FieldType::Str),
        ("merchantRefNum", FieldType::Str),
        ("amount", FieldType::Int),
        ("txnTime", FieldType::DateTime),
        ("status", FieldType::Enum(SETTLEMENT_STATUSES)),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

pub static AUTHORIZATION_REVERSAL_SCHEMA: Schema = Schema {
    name: "AuthorizationReversal",
    fields: &[
        ("id", FieldType::Str),
        ("merchantRefNum", FieldType::Str),
        ("amount", FieldType::Int),
        ("txnTime", FieldType::DateTime),
        ("status", FieldType::Enum(SETTLEMENT_STATUSES)),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

pub static VERIFICATION_SCHEMA: Schema = Schema {
    name: "Verification",
    fields: &[
        ("id", FieldType::Str),
        ("merchantRefNum", FieldType::Str),
        ("currencyCode", FieldType::Str),
        ("customerIp", FieldType::Str),
        ("description", FieldType::Str),
        ("authCode", FieldType::Str),
        ("txnTime", FieldType::DateTime),
        ("status", FieldType::Enum(VERIFICATION_STATUSES)),
        ("avsResponse", FieldType::Enum(AVS_RESPONSES)),
        ("cvvVerification", FieldType::Enum(CVV_VERIFICATIONS)),
        ("card", FieldType::Object(&CARD_SCHEMA)),
        ("profile", FieldType::Object(&PROFILE_SCHEMA)),
        ("billingDetails", FieldType::Object(&BILLING_DETAILS_SCHEMA)),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

gateway_entity! {
    /// Card expiry block (`month`/`year`)
    CardExpiry, CARD_EXPIRY_SCHEMA
}

impl CardExpiry {
    entity_getters! {
        month => int "month";
        year => int "year";
    }
}

gateway_entity! {
    /// A payment card, either inline on a transaction or stored in the vault
    Card, CARD_SCHEMA
}

impl Card {
    /// Start building a card for the customer vault
    pub fn builder() -> CardBuilder {
        CardBuilder {
            engine: ContainerBuilder::new(&CARD_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        nick_name => str "nickName";
        holder_name => str "holderName";
        last_digits => str "lastDigits";
        card_expiry => object CardExpiry, "cardExpiry";
        card_type => str "cardType";
        billing_address_id => str "billingAddressId";
        payment_token => str "paymentToken";
        status => str "status";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

gateway_entity! {
    /// A card payment authorization
    Authorization, AUTHORIZATION_SCHEMA
}

impl Pageable for Authorization {
    const PAGEABLE_KEY: &'static str = "auths";
}

impl Authorization {
    /// Start building an authorization request
    pub fn builder() -> AuthorizationBuilder {
        AuthorizationBuilder {
            engine: ContainerBuilder::new(&AUTHORIZATION_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
        settle_with_auth => bool "settleWithAuth";
        available_to_settle => int "availableToSettle";
        currency_code => str "currencyCode";
        auth_code => str "authCode";
        txn_time => datetime "txnTime";
        status => str "status";
        avs_response => str "avsResponse";
        cvv_verification => str "cvvVerification";
        card => object Card, "card";
        profile => object Profile, "profile";
        billing_details => object BillingDetails, "billingDetails";
        settlements => list Settlement, "settlements";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

gateway_entity! {
    /// A settlement (capture) against an authorization
    Settlement, SETTLEMENT_SCHEMA
}

impl Pageable for Settlement {
    const PAGEABLE_KEY: &'static str = "settlements";
}

impl Settlement {
    pub fn builder() -> SettlementBuilder {
        SettlementBuilder {
            engine: ContainerBuilder::new(&SETTLEMENT_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
        available_to_refund => int "availableToRefund";
        txn_time => datetime "txnTime";
        status => str "status";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

gateway_entity! {
    /// A refund against a settlement
    Refund, REFUND_SCHEMA
}

impl Pageable for Refund {
    const PAGEABLE_KEY: &'static str = "refunds";
}

impl Refund {
    pub fn builder() -> RefundBuilder {
        RefundBuilder {
            engine: ContainerBuilder::new(&REFUND_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
        txn_time => datetime "txnTime";
        status => str "status";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

gateway_entity! {
    /// A void of an unsettled authorization
    AuthorizationReversal, AUTHORIZATION_REVERSAL_SCHEMA
}

impl AuthorizationReversal {
    pub fn builder() -> AuthorizationReversalBuilder {
        AuthorizationReversalBuilder {
            engine: ContainerBuilder::new(&AUTHORIZATION_REVERSAL_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
        txn_time => datetime "txnTime";
        status => str "status";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

gateway_entity! {
    /// A zero-amount card verification
    Verification, VERIFICATION_SCHEMA
}

impl Pageable for Verification {
    const PAGEABLE_KEY: &'static str = "verifications";
}

impl Verification {
    pub fn builder() -> VerificationBuilder {
        VerificationBuilder {
            engine: ContainerBuilder::new(&VERIFICATION_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        merchant_ref_num => str "merchantRefNum";
        currency_code => str "currencyCode";
        auth_code => str "authCode";
        txn_time => datetime "txnTime";
        status => str "status";
        avs_response => str "avsResponse";
        cvv_verification => str "cvvVerification";
        card => object Card, "card";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

// =============================================================================
// Builders
// =============================================================================

/// In-progress `card` block on an authorization or verification request
pub struct CardSection<'a> {
    engine: &'a mut ContainerBuilder,
}

impl<'a> CardSection<'a> {
    pub(crate) fn new(engine: &'a mut ContainerBuilder) -> Self {
        Self { engine }
    }

    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        self.engine
    }

    builder_setters! {
        card_num => str "cardNum";
        cvv => str "cvv";
        holder_name => str "holderName";
        payment_token => str "paymentToken";
        single_use_token => str "singleUseToken";
    }

    /// Access the cached `cardExpiry` block
    pub fn expiry(&mut self) -> CardExpirySection<'_> {
        CardExpirySection {
            engine: self.engine.nested("cardExpiry", &CARD_EXPIRY_SCHEMA),
        }
    }

    /// Finish the card block
    pub fn done(self) {}
}

/// In-progress `cardExpiry` block
pub struct CardExpirySection<'a> {
    engine: &'a mut ContainerBuilder,
}

impl<'a> CardExpirySection<'a> {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        self.engine
    }

    builder_setters! {
        month => int "month";
        year => int "year";
    }

    pub fn done(self) {}
}

/// Fluent builder for a customer vault card
pub struct CardBuilder {
    engine: ContainerBuilder,
}

impl CardBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        card_num => str "cardNum";
        holder_name => str "holderName";
        nick_name => str "nickName";
        billing_address_id => str "billingAddressId";
        single_use_token => str "singleUseToken";
    }

    /// Access the cached `cardExpiry` block
    pub fn expiry(&mut self) -> CardExpirySection<'_> {
        CardExpirySection {
            engine: self.engine.nested("cardExpiry", &CARD_EXPIRY_SCHEMA),
        }
    }

    pub fn build(&self) -> GatewayResult<Card> {
        self.engine.build().map(Card::from_container)
    }
}

/// Fluent builder for an authorization request
pub struct AuthorizationBuilder {
    engine: ContainerBuilder,
}

impl AuthorizationBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
        settle_with_auth => bool "settleWithAuth";
        currency_code => str "currencyCode";
        customer_ip => str "customerIp";
        description => str "description";
    }

    /// Access the cached `card` block
    pub fn card(&mut self) -> CardSection<'_> {
        CardSection::new(self.engine.nested("card", &CARD_SCHEMA))
    }

    /// Access the cached `billingDetails` block
    pub fn billing_details(&mut self) -> BillingDetailsSection<'_> {
        BillingDetailsSection::new(self.engine.nested("billingDetails", &BILLING_DETAILS_SCHEMA))
    }

    /// Access the cached `profile` block
    pub fn profile(&mut self) -> ProfileSection<'_> {
        ProfileSection::new(self.engine.nested("profile", &PROFILE_SCHEMA))
    }

    pub fn build(&self) -> GatewayResult<Authorization> {
        self.engine.build().map(Authorization::from_container)
    }
}

/// Fluent builder for a settlement request
pub struct SettlementBuilder {
    engine: ContainerBuilder,
}

impl SettlementBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
    }

    pub fn build(&self) -> GatewayResult<Settlement> {
        self.engine.build().map(Settlement::from_container)
    }
}

/// Fluent builder for a refund request
pub struct RefundBuilder {
    engine: ContainerBuilder,
}

impl RefundBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
    }

    pub fn build(&self) -> GatewayResult<Refund> {
        self.engine.build().map(Refund::from_container)
    }
}

/// Fluent builder for an authorization reversal
pub struct AuthorizationReversalBuilder {
    engine: ContainerBuilder,
}

impl AuthorizationReversalBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
    }

    pub fn build(&self) -> GatewayResult<AuthorizationReversal> {
        self.engine.build().map(AuthorizationReversal::from_container)
    }
}

/// Fluent builder for a card verification request
pub struct VerificationBuilder {
    engine: ContainerBuilder,
}

impl VerificationBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        merchant_ref_num => str "merchantRefNum";
        currency_code => str "currencyCode";
        customer_ip => str "customerIp";
        description => str "description";
    }

    /// Access the cached `card` block
    pub fn card(&mut self) -> CardSection<'_> {
        CardSection::new(self.engine.nested("card", &CARD_SCHEMA))
    }

    /// Access the cached `billingDetails` block
    pub fn billing_details(&mut self) -> BillingDetailsSection<'_> {
        BillingDetailsSection::new(self.engine.nested("billingDetails", &BILLING_DETAILS_SCHEMA))
    }

    pub fn build(&self) -> GatewayResult<Verification> {
        self.engine.build().map(Verification::from_container)
    }
}
