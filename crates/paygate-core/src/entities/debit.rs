//! # Direct Debit Entities
//!
//! ACH purchases and standalone credits.

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

pub static DEBIT_STATUSES: &[&str] = &[
    "RECEIVED",
    "PENDING",
    "PROCESSING",
    "COMPLETED",
    "FAILED",
    "CANCELLED",
];

pub static ACCOUNT_TYPES: &[&str] = &["CHECKING", "SAVINGS", "LOAN"];

pub static PAY_METHODS: &[&str] = &["WEB", "TEL", "PPD", "CCD"];

pub static ACH_SCHEMA: Schema = Schema {
    name: "Ach",
    fields: &[
        ("accountHolderName", FieldType::Str),
        ("accountType", FieldType::Enum(ACCOUNT_TYPES)),
        ("accountNumber", FieldType::Str),
        ("routingNumber", FieldType::Str),
        ("lastDigits", FieldType::Str),
        ("payMethod", FieldType::Enum(PAY_METHODS)),
    ],
};

pub static PURCHASE_SCHEMA: Schema = Schema {
    name: "Purchase",
    fields: &[
        ("id", FieldType::Str),
        ("merchantRefNum", FieldType::Str),
        ("amount", FieldType::Int),
        ("customerIp", FieldType::Str),
        ("txnTime", FieldType::DateTime),
        ("status", FieldType::Enum(DEBIT_STATUSES)),
        ("ach", FieldType::Object(&ACH_SCHEMA)),
        ("profile", FieldType::Object(&PROFILE_SCHEMA)),
        ("billingDetails", FieldType::Object(&BILLING_DETAILS_SCHEMA)),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

pub static STANDALONE_CREDIT_SCHEMA: Schema = Schema {
    name: "StandaloneCredit",
    fields: &[
        ("id", FieldType::Str),
        ("merchantRefNum", FieldType::Str),
        ("amount", FieldType::Int),
        ("customerIp", FieldType::Str),
        ("txnTime", FieldType::DateTime),
        ("status", FieldType::Enum(DEBIT_STATUSES)),
        ("ach", FieldType::Object(&ACH_SCHEMA)),
        ("profile", FieldType::Object(&PROFILE_SCHEMA)),
        ("billingDetails", FieldType::Object(&BILLING_DETAILS_SCHEMA)),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

gateway_entity! {
    /// ACH bank account block on a direct debit request
    Ach, ACH_SCHEMA
}

impl Ach {
    entity_getters! {
        account_holder_name => str "accountHolderName";
        account_type => str "accountType";
        last_digits => str "lastDigits";
        pay_method => str "payMethod";
    }
}

gateway_entity! {
    /// A direct debit purchase (funds pulled from a bank account)
    Purchase, PURCHASE_SCHEMA
}

impl Pageable for Purchase {
    const PAGEABLE_KEY: &'static str = "purchases";
}

impl Purchase {
    /// Start building a purchase request
    pub fn builder() -> PurchaseBuilder {
        PurchaseBuilder {
            engine: ContainerBuilder::new(&PURCHASE_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
        txn_time => datetime "txnTime";
        status => str "status";
        ach => object Ach, "ach";
        profile => object Profile, "profile";
        billing_details => object BillingDetails, "billingDetails";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

gateway_entity! {
    /// A standalone credit (funds pushed to a bank account)
    StandaloneCredit, STANDALONE_CREDIT_SCHEMA
}

impl Pageable for StandaloneCredit {
    const PAGEABLE_KEY: &'static str = "standaloneCredits";
}

impl StandaloneCredit {
    /// Start building a standalone credit request
    pub fn builder() -> StandaloneCreditBuilder {
        StandaloneCreditBuilder {
            engine: ContainerBuilder::new(&STANDALONE_CREDIT_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
        txn_time => datetime "txnTime";
        status => str "status";
        ach => object Ach, "ach";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

/// In-progress `ach` block on a direct debit request
pub struct AchSection<'a> {
    engine: &'a mut ContainerBuilder,
}

impl<'a> AchSection<'a> {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        self.engine
    }

    builder_setters! {
        account_holder_name => str "accountHolderName";
        account_type => str "accountType";
        account_number => str "accountNumber";
        routing_number => str "routingNumber";
        pay_method => str "payMethod";
    }

    /// Finish the ach block
    pub fn done(self) {}
}

/// Fluent builder for a direct debit purchase
pub struct PurchaseBuilder {
    engine: ContainerBuilder,
}

impl PurchaseBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
        customer_ip => str "customerIp";
    }

    /// Access the cached `ach` block
    pub fn ach(&mut self) -> AchSection<'_> {
        AchSection {
            engine: self.engine.nested("ach", &ACH_SCHEMA),
        }
    }

    /// Access the cached `billingDetails` block
    pub fn billing_details(&mut self) -> BillingDetailsSection<'_> {
        BillingDetailsSection::new(self.engine.nested("billingDetails", &BILLING_DETAILS_SCHEMA))
    }

    /// Access the cached `profile` block
    pub fn profile(&mut self) -> ProfileSection<'_> {
        ProfileSection::new(self.engine.nested("profile", &PROFILE_SCHEMA))
    }

    pub fn build(&self) -> GatewayResult<Purchase> {
        self.engine.build().map(Purchase::from_container)
    }
}

/// Fluent builder for a standalone credit
pub struct StandaloneCreditBuilder {
    engine: ContainerBuilder,
}

impl StandaloneCreditBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        merchant_ref_num => str "merchantRefNum";
        amount => int "amount";
        customer_ip => str "customerIp";
    }

    /// Access the cached `ach` block
    pub fn ach(&mut self) -> AchSection<'_> {
        AchSection {
            engine: self.engine.nested("ach", &ACH_SCHEMA),
        }
    }

    /// Access the cached `billingDetails` block
    pub fn billing_details(&mut self) -> BillingDetailsSection<'_> {
        BillingDetailsSection::new(self.engine.nested("billingDetails", &BILLING_DETAILS_SCHEMA))
    }

    pub fn build(&self) -> GatewayResult<StandaloneCredit> {
        self.engine.build().map(StandaloneCredit::from_container)
    }
}
