//! # Container Builder
//!
//! The generic accumulator behind every fluent entity builder. A builder
//! holds unvalidated slots; `build` replays them through the container's
//! typed setters, so schema and type errors surface at build time, strictly
//! before any request is sent.
//!
//! Nested sub-objects are held as open child builders cached in the parent's
//! slot for the field, so repeated access returns the same in-progress child
//! and a parent built mid-construction still resolves it.

use crate::container::Container;
use crate::error::GatewayResult;
use crate::schema::Schema;
use crate::value::Value;
use std::collections::BTreeMap;

enum Slot {
    Resolved(Value),
    Open(ContainerBuilder),
}

/// A mutable accumulator that produces an immutable [`Container`]
pub struct ContainerBuilder {
    schema: &'static Schema,
    slots: BTreeMap<&'static str, Slot>,
}

impl ContainerBuilder {
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            slots: BTreeMap::new(),
        }
    }

    /// The schema the built container will be validated against
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Store a value for a field. Last write wins; a previously open child
    /// builder in the slot is discarded.
    pub fn put(&mut self, key: &'static str, value: impl Into<Value>) {
        self.slots.insert(key, Slot::Resolved(value.into()));
    }

    /// Chainable form of [`put`](Self::put)
    pub fn with(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.put(key, value);
        self
    }

    /// Append a value to a list field, creating the list on first use
    pub fn push(&mut self, key: &'static str, value: impl Into<Value>) {
        match self.slots.get_mut(key) {
            Some(Slot::Resolved(Value::List(items))) => items.push(value.into()),
            _ => {
                self.slots
                    .insert(key, Slot::Resolved(Value::List(vec![value.into()])));
            }
        }
    }

    /// Access the in-progress child builder for a nested-object field.
    ///
    /// The child is created on first access and cached in the field's slot,
    /// so repeated calls return the same instance and mutations through any
    /// access are visible in the final build. Control returns to the parent
    /// when the borrow ends.
    pub fn nested(&mut self, key: &'static str, schema: &'static Schema) -> &mut ContainerBuilder {
        if !matches!(self.slots.get(key), Some(Slot::Open(_))) {
            self.slots.insert(key, Slot::Open(ContainerBuilder::new(schema)));
        }
        match self.slots.get_mut(key) {
            Some(Slot::Open(child)) => child,
            _ => unreachable!("slot was just initialized as open"),
        }
    }

    /// True if no slot has been touched
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Materialize a container from the current slots.
    ///
    /// Idempotent: the builder is not consumed, and each call reflects the
    /// latest state. Children still open at this point are resolved to their
    /// container form here, not at accessor time.
    pub fn build(&self) -> GatewayResult<Container> {
        let mut container = Container::new(self.schema);
        for (key, slot) in &self.slots {
            let value = match slot {
                Slot::Resolved(value) => value.clone(),
                Slot::Open(child) => Value::Object(child.build()?),
            };
            container.set(key, value)?;
        }
        Ok(container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::schema::FieldType;

    static EXPIRY: Schema = Schema {
        name: "TestExpiry",
        fields: &[("month", FieldType::Int), ("year", FieldType::Int)],
    };

    static CARD: Schema = Schema {
        name: "TestCard",
        fields: &[
            ("cardNum", FieldType::Str),
            ("cardExpiry", FieldType::Object(&EXPIRY)),
        ],
    };

    static CARD_FIELD: FieldType = FieldType::Object(&CARD);

    static AUTH: Schema = Schema {
        name: "TestAuth",
        fields: &[
            ("merchantRefNum", FieldType::Str),
            ("amount", FieldType::Int),
            ("card", FieldType::Object(&CARD)),
            ("cards", FieldType::List(&CARD_FIELD)),
        ],
    };

    #[test]
    fn test_build_is_idempotent() {
        let builder = ContainerBuilder::new(&AUTH)
            .with("merchantRefNum", "ref-1")
            .with("amount", 500_i64);

        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first.to_json(), second.to_json());
    }

    #[test]
    fn test_build_reflects_latest_state() {
        let mut builder = ContainerBuilder::new(&AUTH).with("amount", 100_i64);
        let before = builder.build().unwrap();
        builder.put("amount", 200_i64);
        let after = builder.build().unwrap();

        assert_eq!(before.get_int("amount").unwrap(), Some(100));
        assert_eq!(after.get_int("amount").unwrap(), Some(200));
    }

    #[test]
    fn test_nested_builder_is_cached() {
        let mut builder = ContainerBuilder::new(&AUTH);
        builder.nested("card", &CARD).put("cardNum", "4111111111111111");
        // second access returns the same in-progress child
        builder
            .nested("card", &CARD)
            .nested("cardExpiry", &EXPIRY)
            .put("month", 6_i64);

        let container = builder.build().unwrap();
        let card = container.get_object("card").unwrap().unwrap();
        assert_eq!(card.get_str("cardNum").unwrap(), Some("4111111111111111"));
        let expiry = card.get_object("cardExpiry").unwrap().unwrap();
        assert_eq!(expiry.get_int("month").unwrap(), Some(6));
    }

    #[test]
    fn test_open_child_resolved_at_build_time() {
        let mut builder = ContainerBuilder::new(&AUTH).with("amount", 500_i64);
        builder.nested("card", &CARD).put("cardNum", "4111111111111111");

        // build with the child still open
        let mid = builder.build().unwrap();
        assert!(mid.get_object("card").unwrap().is_some());

        // keep mutating the same open child afterwards
        builder.nested("card", &CARD).put("cardNum", "5500000000000004");
        let done = builder.build().unwrap();
        assert_eq!(
            done.get_object("card").unwrap().unwrap().get_str("cardNum").unwrap(),
            Some("5500000000000004")
        );
    }

    #[test]
    fn test_put_overwrites_open_child() {
        let mut builder = ContainerBuilder::new(&AUTH);
        builder.nested("card", &CARD).put("cardNum", "4111111111111111");

        let replacement = ContainerBuilder::new(&CARD)
            .with("cardNum", "5500000000000004")
            .build()
            .unwrap();
        builder.put("card", Value::Object(replacement));

        let card_num = builder
            .build()
            .unwrap()
            .get_object("card")
            .unwrap()
            .unwrap()
            .get_str("cardNum")
            .unwrap()
            .map(String::from);
        assert_eq!(card_num.as_deref(), Some("5500000000000004"));
    }

    #[test]
    fn test_type_errors_surface_at_build() {
        let builder = ContainerBuilder::new(&AUTH).with("amount", "not-a-number");
        assert!(matches!(
            builder.build(),
            Err(GatewayError::FieldType { .. })
        ));
    }

    #[test]
    fn test_push_accumulates_list() {
        let card = ContainerBuilder::new(&CARD)
            .with("cardNum", "4111111111111111")
            .build()
            .unwrap();
        let other = ContainerBuilder::new(&CARD)
            .with("cardNum", "5500000000000004")
            .build()
            .unwrap();

        let mut builder = ContainerBuilder::new(&AUTH);
        builder.push("cards", Value::Object(card));
        builder.push("cards", Value::Object(other));

        let container = builder.build().unwrap();
        assert_eq!(container.get_list("cards").unwrap().unwrap().len(), 2);
    }
}
