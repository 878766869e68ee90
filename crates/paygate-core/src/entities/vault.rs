//! # Customer Vault Entities
//!
//! Stored customer profiles and their addresses. Vaulted cards share the
//! card schema with the card payment entities.

use crate::builder::ContainerBuilder;
use crate::entities::card::CARD_SCHEMA;
use crate::entities::common::{ErrorBody, Link, ERROR_SCHEMA, LINK_FIELD};
use crate::entities::{builder_setters, entity_getters, gateway_entity, Card, Entity};
use crate::error::GatewayResult;
use crate::schema::{FieldType, Schema};

pub static PROFILE_STATUSES: &[&str] = &["INITIAL", "ACTIVE"];

pub static ADDRESS_STATUSES: &[&str] = &["ACTIVE"];

pub static LOCALES: &[&str] = &["en_US", "en_GB", "fr_CA"];

pub static ADDRESS_SCHEMA: Schema = Schema {
    name: "Address",
    fields: &[
        ("id", FieldType::Str),
        ("nickName", FieldType::Str),
        ("recipientName", FieldType::Str),
        ("street", FieldType::Str),
        ("street2", FieldType::Str),
        ("city", FieldType::Str),
        ("state", FieldType::Str),
        ("country", FieldType::Str),
        ("zip", FieldType::Str),
        ("phone", FieldType::Str),
        ("status", FieldType::Enum(ADDRESS_STATUSES)),
        ("defaultShippingAddressIndicator", FieldType::Bool),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

static CARD_FIELD: FieldType = FieldType::Object(&CARD_SCHEMA);

static ADDRESS_FIELD: FieldType = FieldType::Object(&ADDRESS_SCHEMA);

pub static PROFILE_SCHEMA: Schema = Schema {
    name: "Profile",
    fields: &[
        ("id", FieldType::Str),
        ("status", FieldType::Enum(PROFILE_STATUSES)),
        ("merchantCustomerId", FieldType::Str),
        ("locale", FieldType::Enum(LOCALES)),
        ("firstName", FieldType::Str),
        ("middleName", FieldType::Str),
        ("lastName", FieldType::Str),
        ("email", FieldType::Str),
        ("phone", FieldType::Str),
        ("ip", FieldType::Str),
        ("cards", FieldType::List(&CARD_FIELD)),
        ("addresses", FieldType::List(&ADDRESS_FIELD)),
        ("error", FieldType::Object(&ERROR_SCHEMA)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

gateway_entity! {
    /// A stored customer profile
    Profile, PROFILE_SCHEMA
}

impl Profile {
    /// Start building a profile for the vault
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder {
            engine: ContainerBuilder::new(&PROFILE_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        status => str "status";
        merchant_customer_id => str "merchantCustomerId";
        locale => str "locale";
        first_name => str "firstName";
        middle_name => str "middleName";
        last_name => str "lastName";
        email => str "email";
        phone => str "phone";
        cards => list Card, "cards";
        addresses => list Address, "addresses";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

gateway_entity! {
    /// A shipping or billing address stored on a profile
    Address, ADDRESS_SCHEMA
}

impl Address {
    /// Start building an address for the vault
    pub fn builder() -> AddressBuilder {
        AddressBuilder {
            engine: ContainerBuilder::new(&ADDRESS_SCHEMA),
        }
    }

    entity_getters! {
        id => str "id";
        nick_name => str "nickName";
        recipient_name => str "recipientName";
        street => str "street";
        street2 => str "street2";
        city => str "city";
        state => str "state";
        country => str "country";
        zip => str "zip";
        phone => str "phone";
        status => str "status";
        default_shipping => bool "defaultShippingAddressIndicator";
        error => object ErrorBody, "error";
        links => list Link, "links";
    }
}

/// In-progress `profile` block on a transaction request
pub struct ProfileSection<'a> {
    engine: &'a mut ContainerBuilder,
}

impl<'a> ProfileSection<'a> {
    pub(crate) fn new(engine: &'a mut ContainerBuilder) -> Self {
        Self { engine }
    }

    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        self.engine
    }

    builder_setters! {
        first_name => str "firstName";
        last_name => str "lastName";
        email => str "email";
    }

    /// Finish the profile block
    pub fn done(self) {}
}

/// Fluent builder for a customer vault profile
pub struct ProfileBuilder {
    engine: ContainerBuilder,
}

impl ProfileBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        merchant_customer_id => str "merchantCustomerId";
        locale => str "locale";
        first_name => str "firstName";
        middle_name => str "middleName";
        last_name => str "lastName";
        email => str "email";
        phone => str "phone";
        ip => str "ip";
    }

    /// Append a card to store alongside the profile
    pub fn card(mut self, card: Card) -> Self {
        let value = crate::value::Value::Object(card.into_container());
        self.engine.push("cards", value);
        self
    }

    pub fn build(&self) -> GatewayResult<Profile> {
        self.engine.build().map(Profile::from_container)
    }
}

/// Fluent builder for a vault address
pub struct AddressBuilder {
    engine: ContainerBuilder,
}

impl AddressBuilder {
    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.engine
    }

    builder_setters! {
        nick_name => str "nickName";
        recipient_name => str "recipientName";
        street => str "street";
        street2 => str "street2";
        city => str "city";
        state => str "state";
        country => str "country";
        zip => str "zip";
        phone => str "phone";
        default_shipping => bool "defaultShippingAddressIndicator";
    }

    pub fn build(&self) -> GatewayResult<Address> {
        self.engine.build().map(Address::from_container)
    }
}
