//! # Shared Entity Blocks
//!
//! Schema fragments that recur across the card payment, customer vault, and
//! direct debit entities: link relations, the structured `error` sub-object
//! carried on failed entities, and billing details.

use crate::builder::ContainerBuilder;
use crate::entities::{builder_setters, entity_getters, gateway_entity};
use crate::schema::{FieldType, Schema};

pub static LINK_SCHEMA: Schema = Schema {
    name: "Link",
    fields: &[("rel", FieldType::Str), ("href", FieldType::Str)],
};

pub static LINK_FIELD: FieldType = FieldType::Object(&LINK_SCHEMA);

pub static STR_FIELD: FieldType = FieldType::Str;

pub static FIELD_ERROR_SCHEMA: Schema = Schema {
    name: "FieldError",
    fields: &[("field", FieldType::Str), ("error", FieldType::Str)],
};

pub static FIELD_ERROR_FIELD: FieldType = FieldType::Object(&FIELD_ERROR_SCHEMA);

/// The structured error payload the gateway attaches to failed entities
pub static ERROR_SCHEMA: Schema = Schema {
    name: "Error",
    fields: &[
        ("code", FieldType::Str),
        ("message", FieldType::Str),
        ("details", FieldType::List(&STR_FIELD)),
        ("fieldErrors", FieldType::List(&FIELD_ERROR_FIELD)),
        ("links", FieldType::List(&LINK_FIELD)),
    ],
};

pub static BILLING_DETAILS_SCHEMA: Schema = Schema {
    name: "BillingDetails",
    fields: &[
        ("street", FieldType::Str),
        ("street2", FieldType::Str),
        ("city", FieldType::Str),
        ("state", FieldType::Str),
        ("country", FieldType::Str),
        ("zip", FieldType::Str),
        ("phone", FieldType::Str),
    ],
};

gateway_entity! {
    /// A `{rel, href}` link relation on a response
    Link, LINK_SCHEMA
}

impl Link {
    entity_getters! {
        rel => str "rel";
        href => str "href";
    }
}

gateway_entity! {
    /// One field-level error inside a gateway error payload
    FieldError, FIELD_ERROR_SCHEMA
}

impl FieldError {
    entity_getters! {
        field => str "field";
        error => str "error";
    }
}

gateway_entity! {
    /// The `error` sub-object many entities carry after a failed operation
    ErrorBody, ERROR_SCHEMA
}

impl ErrorBody {
    entity_getters! {
        code => str "code";
        message => str "message";
        field_errors => list FieldError, "fieldErrors";
        links => list Link, "links";
    }
}

gateway_entity! {
    /// Cardholder or account-holder billing address
    BillingDetails, BILLING_DETAILS_SCHEMA
}

impl BillingDetails {
    entity_getters! {
        street => str "street";
        street2 => str "street2";
        city => str "city";
        state => str "state";
        country => str "country";
        zip => str "zip";
        phone => str "phone";
    }
}

/// In-progress `billingDetails` block on a request builder.
/// Dropping the section (or calling [`done`](Self::done)) returns control to
/// the parent builder; the accumulated fields stay cached in the parent.
pub struct BillingDetailsSection<'a> {
    engine: &'a mut ContainerBuilder,
}

impl<'a> BillingDetailsSection<'a> {
    pub(crate) fn new(engine: &'a mut ContainerBuilder) -> Self {
        Self { engine }
    }

    fn engine_mut(&mut self) -> &mut ContainerBuilder {
        self.engine
    }

    builder_setters! {
        street => str "street";
        street2 => str "street2";
        city => str "city";
        state => str "state";
        country => str "country";
        zip => str "zip";
        phone => str "phone";
    }

    /// Finish the billing details block
    pub fn done(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;
    use serde_json::json;

    #[test]
    fn test_error_body_parses_field_errors() {
        let map = json!({
            "code": "5068",
            "message": "Either you submitted a request that is missing a mandatory field or the value of a field does not match the format expected.",
            "fieldErrors": [
                { "field": "amount", "error": "must be greater than zero" }
            ]
        })
        .as_object()
        .unwrap()
        .clone();

        let error = ErrorBody::from_json(&map).unwrap();
        assert_eq!(error.code().unwrap(), Some("5068"));
        let field_errors = error.field_errors().unwrap();
        assert_eq!(field_errors.len(), 1);
        assert_eq!(field_errors[0].field().unwrap(), Some("amount"));
    }

    #[test]
    fn test_link_round_trip() {
        let map = json!({ "rel": "next", "href": "/v1/auths?offset=10" })
            .as_object()
            .unwrap()
            .clone();
        let link = Link::from_json(&map).unwrap();
        assert_eq!(link.rel().unwrap(), Some("next"));
        assert_eq!(link.to_json(), map);
    }
}
