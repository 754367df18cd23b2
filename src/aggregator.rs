// src/aggregator.rs

use tracing::instrument;
//
use crate::{
    cache::{get_or_create_order, AggregationContext},
    handling_unit::{append_handling_unit, attach_purchase_orders},
    key::{OrderKey, ShipmentKey},
    order::build_order,
    orderin::RootOrderIn,
    row::OrderInRow,
    shipment::build_shipment,
    services::Collaborators,
};

#[derive(Clone, Debug)]
pub struct ProcessedRow {
    pub correlation_id: String,
    pub shipment_key: ShipmentKey,
    pub shipment_created: bool,
    pub order_created: bool,
    pub handling_unit_appended: bool,
    pub purchase_orders_attached: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub shipments: usize,
    pub orders: usize,
    pub handling_units: usize,
}

/// Folds rows, in stream order, into one growing document per shipment key.
pub struct Aggregator<C: Collaborators> {
    services: C,
    context: AggregationContext,
    rows: usize,
}

impl<C: Collaborators> Aggregator<C> {
    pub fn new(services: C) -> Self {
        Self {
            services,
            context: AggregationContext::new(),
            rows: 0,
        }
    }

    #[instrument(skip_all, fields(order_in_reference = ?row.order_in_reference))]
    pub fn process(&mut self, row: &OrderInRow) -> ProcessedRow {
        let correlation_id = self.services.generate_id();
        let shipment_key = ShipmentKey::from_row(row);
        let order_key = OrderKey::from_row(row);
        let services = &self.services;

        let (doc, shipment_created) = self
            .context
            .get_or_create_shipment(shipment_key.clone(), || build_shipment(row, services));
        if shipment_created {
            tracing::debug!(%shipment_key, "created shipment");
        }

        let (order, order_created) =
            get_or_create_order(&mut doc.shipment, &order_key, || build_order(row, services));
        if order_created {
            tracing::debug!(%shipment_key, order = ?order_key.as_deref(), "created order");
        }

        let handling_unit_appended = append_handling_unit(order, row);
        if handling_unit_appended {
            tracing::debug!(
                tracking_code = ?row.handling_unit_tracking_code,
                "appended handling unit"
            );
        }
        let purchase_orders_attached = attach_purchase_orders(order, row);

        self.rows += 1;

        ProcessedRow {
            correlation_id,
            shipment_key,
            shipment_created,
            order_created,
            handling_unit_appended,
            purchase_orders_attached,
        }
    }

    pub fn process_all<'a>(&mut self, rows: impl IntoIterator<Item = &'a OrderInRow>) -> usize {
        let mut processed = 0;
        for row in rows {
            self.process(row);
            processed += 1;
        }
        processed
    }

    pub fn shipment(&self, key: &ShipmentKey) -> Option<&RootOrderIn> {
        self.context.shipment(key)
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            rows: self.rows,
            shipments: self.context.len(),
            ..Default::default()
        };
        for (_, doc) in self.context.shipments() {
            summary.orders += doc.shipment.orders.len();
            summary.handling_units += doc
                .shipment
                .orders
                .iter()
                .map(|order| order.handling_units.as_ref().map_or(0, Vec::len))
                .sum::<usize>();
        }
        summary
    }

    // shipments come out in first-seen order
    pub fn finish(self) -> Vec<RootOrderIn> {
        let summary = self.summary();
        tracing::info!(
            rows = summary.rows,
            shipments = summary.shipments,
            orders = summary.orders,
            handling_units = summary.handling_units,
            "aggregation finished"
        );

        self.context
            .into_shipments()
            .into_iter()
            .map(|(_, doc)| doc)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::FixedCollaborators;

    fn row(tour: &str, dq: &str) -> OrderInRow {
        OrderInRow {
            shipment_reference: Some(tour.to_string()),
            order_reference_dq: Some(dq.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_process_reports_what_was_created() {
        let mut aggregator = Aggregator::new(FixedCollaborators::new());

        let first = aggregator.process(&row("T1", "DQ-1"));
        assert!(first.shipment_created && first.order_created);

        let second = aggregator.process(&row("T1", "DQ-1"));
        assert!(!second.shipment_created && !second.order_created);

        let third = aggregator.process(&row("T1", "DQ-2"));
        assert!(!third.shipment_created && third.order_created);

        assert_ne!(first.correlation_id, second.correlation_id);
        assert_eq!(
            aggregator.summary(),
            RunSummary { rows: 3, shipments: 1, orders: 2, handling_units: 0 }
        );
    }

    #[test]
    fn test_first_row_wins_for_order_fields() {
        let mut aggregator = Aggregator::new(FixedCollaborators::new());
        let mut first = row("T1", "DQ-1");
        first.goods_description = Some("first".to_string());
        let mut second = row("T1", "DQ-1");
        second.goods_description = Some("second".to_string());

        aggregator.process_all([&first, &second]);

        let doc = aggregator.shipment(&ShipmentKey::from_row(&first)).unwrap();
        assert_eq!(doc.shipment.orders[0].goods_description.as_deref(), Some("first"));
    }
}
