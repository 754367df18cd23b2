// src/cache.rs

use std::collections::{hash_map::Entry, HashMap};
//
use crate::{
    key::{OrderKey, ShipmentKey},
    orderin::{Order, RootOrderIn, Shipment},
};

// every record of a shipment key must reach the same context
#[derive(Debug, Default)]
pub struct AggregationContext {
    index: HashMap<ShipmentKey, usize>,
    shipments: Vec<(ShipmentKey, RootOrderIn)>,
}

impl AggregationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shipment for `key`, building it on first sighting only.
    pub fn get_or_create_shipment(
        &mut self,
        key: ShipmentKey,
        create: impl FnOnce() -> RootOrderIn,
    ) -> (&mut RootOrderIn, bool) {
        let (index, created) = match self.index.entry(key) {
            Entry::Occupied(entry) => (*entry.get(), false),
            Entry::Vacant(entry) => {
                let index = self.shipments.len();
                self.shipments.push((entry.key().clone(), create()));
                entry.insert(index);
                (index, true)
            }
        };

        (&mut self.shipments[index].1, created)
    }

    pub fn shipment(&self, key: &ShipmentKey) -> Option<&RootOrderIn> {
        self.index.get(key).map(|&index| &self.shipments[index].1)
    }

    pub fn shipments(&self) -> impl Iterator<Item = (&ShipmentKey, &RootOrderIn)> {
        self.shipments.iter().map(|(key, doc)| (key, doc))
    }

    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }

    pub fn into_shipments(self) -> Vec<(ShipmentKey, RootOrderIn)> {
        self.shipments
    }
}

// an order without a DQ reference never matches
pub fn get_or_create_order<'s>(
    shipment: &'s mut Shipment,
    key: &OrderKey,
    create: impl FnOnce() -> Order,
) -> (&'s mut Order, bool) {
    let existing = key
        .as_deref()
        .and_then(|reference_dq| shipment.order_position(reference_dq));

    match existing {
        Some(index) => (&mut shipment.orders[index], false),
        None => {
            shipment.orders.push(create());
            let index = shipment.orders.len() - 1;
            (&mut shipment.orders[index], true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderin::{Reference, QUALIFIER_DQ};

    fn key(reference: &str) -> ShipmentKey {
        ShipmentKey {
            shipment_reference: Some(reference.to_string()),
            ..Default::default()
        }
    }

    fn order(reference_dq: &str) -> Order {
        Order {
            references: vec![Reference {
                qualifier: QUALIFIER_DQ.to_string(),
                reference: reference_dq.to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_shipment_is_created_once_per_key() {
        let mut context = AggregationContext::new();
        let mut builds = 0;

        for reference in ["T1", "T2", "T1", "T1", "T2"] {
            context.get_or_create_shipment(key(reference), || {
                builds += 1;
                RootOrderIn::default()
            });
        }

        assert_eq!(builds, 2);
        assert_eq!(context.len(), 2);
        let order: Vec<_> = context
            .shipments()
            .map(|(k, _)| k.shipment_reference.clone().unwrap())
            .collect();
        assert_eq!(order, vec!["T1", "T2"]);
    }

    #[test]
    fn test_existing_shipment_is_returned_unchanged() {
        let mut context = AggregationContext::new();
        let (doc, created) = context.get_or_create_shipment(key("T1"), RootOrderIn::default);
        doc.meta.message_reference = "first".to_string();
        assert!(created);

        let (doc, created) = context.get_or_create_shipment(key("T1"), || {
            panic!("must not rebuild an existing shipment")
        });
        assert!(!created);
        assert_eq!(doc.meta.message_reference, "first");
        assert!(context.shipment(&key("T1")).is_some());
        assert!(context.shipment(&key("T9")).is_none());
    }

    #[test]
    fn test_orders_are_scoped_by_dq() {
        let mut shipment = Shipment::default();

        let (_, created) =
            get_or_create_order(&mut shipment, &OrderKey(Some("DQ-1".into())), || order("DQ-1"));
        assert!(created);
        let (_, created) =
            get_or_create_order(&mut shipment, &OrderKey(Some("DQ-2".into())), || order("DQ-2"));
        assert!(created);
        let (found, created) = get_or_create_order(&mut shipment, &OrderKey(Some("DQ-1".into())), || {
            panic!("must not rebuild an existing order")
        });
        assert!(!created);
        assert_eq!(found.reference(QUALIFIER_DQ), Some("DQ-1"));
        assert_eq!(shipment.orders.len(), 2);
    }

    #[test]
    fn test_order_without_dq_never_matches() {
        let mut shipment = Shipment::default();
        get_or_create_order(&mut shipment, &OrderKey(None), Order::default);
        let (_, created) = get_or_create_order(&mut shipment, &OrderKey(None), Order::default);

        assert!(created);
        assert_eq!(shipment.orders.len(), 2);
    }

    #[test]
    fn test_into_shipments_hands_over_documents() {
        let mut context = AggregationContext::new();
        context.get_or_create_shipment(key("T1"), RootOrderIn::default);
        assert!(!context.is_empty());

        let shipments = context.into_shipments();
        assert_eq!(shipments.len(), 1);
        assert_eq!(shipments[0].0, key("T1"));
    }
}
