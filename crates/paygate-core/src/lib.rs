//! # paygate-core
//!
//! Typed object model for the paygate-rs payment gateway SDK.
//!
//! This crate provides:
//! - `Container`, the generic schema-validated property bag underlying every
//!   domain entity
//! - `Schema` and `FieldType`, the immutable field-type tables
//! - `RequestRules` for per-operation required/optional field validation
//! - `ContainerBuilder`, the engine behind every fluent entity builder
//! - The domain entities (authorizations, settlements, refunds,
//!   verifications, profiles, addresses, cards, purchases, standalone
//!   credits) with their schema tables and builders
//! - `GatewayError` for typed error handling
//!
//! Nothing in this crate performs I/O; the HTTP seam lives in
//! `paygate-client`.
//!
//! ## Example
//!
//! ```rust
//! use paygate_core::{Authorization, Entity, RequestRules};
//!
//! let mut builder = Authorization::builder()
//!     .merchant_ref_num("order-1001")
//!     .amount(500)
//!     .settle_with_auth(true);
//! builder.card().card_num("4111111111111111").cvv("123").done();
//!
//! let auth = builder.build()?;
//!
//! RequestRules::new()
//!     .require(&["merchantRefNum", "amount", "card"])
//!     .validate(auth.container())?;
//! # Ok::<(), paygate_core::GatewayError>(())
//! ```

pub mod builder;
pub mod container;
pub mod entities;
pub mod error;
pub mod rules;
pub mod schema;
pub mod value;

// Re-exports for convenience
pub use builder::ContainerBuilder;
pub use container::Container;
pub use entities::{
    new_merchant_ref_num, Ach, Address, AddressBuilder, Authorization, AuthorizationBuilder,
    AuthorizationReversal, AuthorizationReversalBuilder, BillingDetails, Card, CardBuilder,
    CardExpiry, Entity, ErrorBody, FieldError, Link, Pageable, Profile, ProfileBuilder, Purchase,
    PurchaseBuilder, Refund, RefundBuilder, Settlement, SettlementBuilder, StandaloneCredit,
    StandaloneCreditBuilder, Verification, VerificationBuilder,
};
pub use error::{GatewayError, GatewayResult};
pub use rules::RequestRules;
pub use schema::{FieldType, Schema};
pub use value::Value;
