//! # Domain Entities
//!
//! Schema tables and typed wrappers for the gateway's domain objects. Every
//! wrapper is a thin shell over the generic [`Container`](crate::Container)
//! engine; the per-field getters and builder setters are macro-generated so
//! the field tables stay the single source of truth.

use crate::container::Container;
use crate::error::GatewayResult;
use crate::schema::Schema;
use serde_json::{Map as JsonMap, Value as JsonValue};
use uuid::Uuid;

pub mod card;
pub mod common;
pub mod debit;
pub mod vault;

pub use card::{
    Authorization, AuthorizationBuilder, AuthorizationReversal, AuthorizationReversalBuilder,
    Card, CardBuilder, CardExpiry, CardExpirySection, CardSection, Refund, RefundBuilder,
    Settlement, SettlementBuilder, Verification, VerificationBuilder,
};
pub use common::{BillingDetails, BillingDetailsSection, ErrorBody, FieldError, Link};
pub use debit::{
    Ach, AchSection, Purchase, PurchaseBuilder, StandaloneCredit, StandaloneCreditBuilder,
};
pub use vault::{Address, AddressBuilder, Profile, ProfileBuilder, ProfileSection};

/// A typed domain object backed by a schema-validated container.
///
/// The trait doubles as the compile-time row factory for pagination: a
/// cursor turns each raw array element into `Self` through
/// [`from_json`](Entity::from_json), with no runtime type handles involved.
pub trait Entity: Sized {
    /// The schema table governing this entity
    fn schema() -> &'static Schema;

    /// Wrap an already-validated container
    fn from_container(container: Container) -> Self;

    /// The underlying container
    fn container(&self) -> &Container;

    /// Unwrap into the underlying container
    fn into_container(self) -> Container;

    /// Parse from a raw response map, ignoring undeclared keys
    fn from_json(map: &JsonMap<String, JsonValue>) -> GatewayResult<Self> {
        Container::from_json(Self::schema(), map).map(Self::from_container)
    }

    /// Flatten to a raw request map, omitting absent fields
    fn to_json(&self) -> JsonMap<String, JsonValue> {
        self.container().to_json()
    }
}

/// An entity the gateway returns in paged list responses
pub trait Pageable: Entity {
    /// The entity-specific JSON key under which the list endpoint nests its
    /// result array
    const PAGEABLE_KEY: &'static str;
}

/// Generate a unique merchant reference number for a new request
pub fn new_merchant_ref_num() -> String {
    Uuid::new_v4().to_string()
}

/// Generates the struct shell and [`Entity`] impl for a domain wrapper
macro_rules! gateway_entity {
    ($(#[$meta:meta])* $name:ident, $schema:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            container: $crate::container::Container,
        }

        impl $crate::entities::Entity for $name {
            fn schema() -> &'static $crate::schema::Schema {
                &$schema
            }

            fn from_container(container: $crate::container::Container) -> Self {
                Self { container }
            }

            fn container(&self) -> &$crate::container::Container {
                &self.container
            }

            fn into_container(self) -> $crate::container::Container {
                self.container
            }
        }
    };
}

/// Generates typed getter methods over the wrapped container
macro_rules! entity_getters {
    () => {};
    ($(#[$meta:meta])* $name:ident => str $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::error::GatewayResult<Option<&str>> {
            self.container.get_str($key)
        }
        $crate::entities::entity_getters!($($rest)*);
    };
    ($(#[$meta:meta])* $name:ident => int $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::error::GatewayResult<Option<i64>> {
            self.container.get_int($key)
        }
        $crate::entities::entity_getters!($($rest)*);
    };
    ($(#[$meta:meta])* $name:ident => bool $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::error::GatewayResult<Option<bool>> {
            self.container.get_bool($key)
        }
        $crate::entities::entity_getters!($($rest)*);
    };
    ($(#[$meta:meta])* $name:ident => datetime $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::error::GatewayResult<Option<::chrono::DateTime<::chrono::Utc>>> {
            self.container.get_datetime($key)
        }
        $crate::entities::entity_getters!($($rest)*);
    };
    ($(#[$meta:meta])* $name:ident => object $ty:ty, $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::error::GatewayResult<Option<$ty>> {
            Ok(self
                .container
                .get_object($key)?
                .cloned()
                .map(<$ty as $crate::entities::Entity>::from_container))
        }
        $crate::entities::entity_getters!($($rest)*);
    };
    ($(#[$meta:meta])* $name:ident => list $ty:ty, $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::error::GatewayResult<Vec<$ty>> {
            let Some(items) = self.container.get_list($key)? else {
                return Ok(Vec::new());
            };
            Ok(items
                .iter()
                .filter_map($crate::value::Value::as_object)
                .cloned()
                .map(<$ty as $crate::entities::Entity>::from_container)
                .collect())
        }
        $crate::entities::entity_getters!($($rest)*);
    };
}

/// Generates chained setter methods over a builder's engine.
/// The target type must expose `fn engine_mut(&mut self) -> &mut ContainerBuilder`.
macro_rules! builder_setters {
    () => {};
    ($(#[$meta:meta])* $name:ident => str $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(mut self, value: impl Into<String>) -> Self {
            self.engine_mut().put($key, $crate::value::Value::Str(value.into()));
            self
        }
        $crate::entities::builder_setters!($($rest)*);
    };
    ($(#[$meta:meta])* $name:ident => int $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(mut self, value: i64) -> Self {
            self.engine_mut().put($key, $crate::value::Value::Int(value));
            self
        }
        $crate::entities::builder_setters!($($rest)*);
    };
    ($(#[$meta:meta])* $name:ident => bool $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(mut self, value: bool) -> Self {
            self.engine_mut().put($key, $crate::value::Value::Bool(value));
            self
        }
        $crate::entities::builder_setters!($($rest)*);
    };
    ($(#[$meta:meta])* $name:ident => datetime $key:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(mut self, value: ::chrono::DateTime<::chrono::Utc>) -> Self {
            self.engine_mut().put($key, $crate::value::Value::DateTime(value));
            self
        }
        $crate::entities::builder_setters!($($rest)*);
    };
}

pub(crate) use builder_setters;
pub(crate) use entity_getters;
pub(crate) use gateway_entity;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchant_ref_nums_are_unique() {
        assert_ne!(new_merchant_ref_num(), new_merchant_ref_num());
    }
}
