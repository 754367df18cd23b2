// src/handling_unit.rs

use crate::{
    normalize::{append_qualified, Gate},
    orderin::{ContentReference, HandlingUnit, Order},
    row::OrderInRow,
};

// identical units are kept side by side
pub fn append_handling_unit(order: &mut Order, row: &OrderInRow) -> bool {
    if !row.has_handling_unit() {
        return false;
    }

    order
        .handling_units
        .get_or_insert_with(Vec::new)
        .push(build_handling_unit(row));

    true
}

fn build_handling_unit(row: &OrderInRow) -> HandlingUnit {
    let mut content_references = Vec::new();
    append_qualified(
        &mut content_references,
        [
            ("item", row.handling_unit_content_reference_item.as_deref(), Gate::Present),
            (
                "purchaseOrder",
                row.handling_unit_content_reference_purchase_order.as_deref(),
                Gate::Present,
            ),
        ],
        |qualifier, reference| ContentReference {
            qualifier: qualifier.to_string(),
            reference: reference.to_string(),
        },
    );

    HandlingUnit {
        tracking_code: row.handling_unit_tracking_code.clone(),
        barcode: row.handling_unit_barcode.clone(),
        packaging_qualifier: row.handling_unit_packaging_qualifier.clone(),
        custom_packaging_qualifier: row.handling_unit_custom_packaging_qualifier.clone(),
        consignor_reference: row.handling_unit_consignor_reference.clone(),
        consolidation_id: row.handling_unit_consolidation_id.clone(),
        gross_weight: row.handling_unit_gross_weight,
        gross_volume: row.handling_unit_gross_volume,
        width: row.handling_unit_width,
        length: row.handling_unit_length,
        height: row.handling_unit_height,
        tracking_url: row.handling_unit_tracking_url.clone(),
        content_references: (!content_references.is_empty()).then_some(content_references),
    }
}

pub fn attach_purchase_orders(order: &mut Order, row: &OrderInRow) -> bool {
    match &row.purchase_order_list {
        Some(list) if !list.is_empty() => {
            order.purchase_orders = Some(list.clone());
            true
        }
        _ => false,
    }
}
