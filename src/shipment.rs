// src/shipment.rs

use crate::{
    normalize::{append_qualified, resolve_carriers, shipment_amount, Gate},
    orderin::{
        BillOfLadingReference, Charges, ComplementaryService, Container, Meta, RootOrderIn,
        Shipment, Status, TransportServiceBuyer, CREATION_MESSAGE_FUNCTION, DEFAULT_QUALIFIER,
        MESSAGE_TYPE, RECEIVER_ID,
    },
    row::OrderInRow,
    services::{Collaborators, MESSAGE_DATE_PATTERN},
};

/// Builds the document for a shipment key seen for the first time. Orders are added later.
pub fn build_shipment(row: &OrderInRow, services: &dyn Collaborators) -> RootOrderIn {
    RootOrderIn {
        meta: build_meta(row, services),
        shipment: Shipment {
            technical_reference: row.shipment_technical_reference.clone(),
            tour_reference: tour_reference(row),
            shipment_type: row.shipment_type.clone(),
            transport_service_buyers: transport_service_buyers(row),
            carriers: resolve_carriers(
                row.carrier_00,
                row.carrier_identifier_zz.as_deref(),
                row.carrier_identifier_sa.as_deref(),
            ),
            transport_means: row.transport_mean_list.clone().filter(|list| !list.is_empty()),
            transport_mode: row.shipment_transport_mode.clone(),
            is_dangerous_goods: row.shipment_is_dangerous_goods,
            next_transport_mode: row.shipment_next_transport_mode.clone(),
            tour_type: row.shipment_tour_type.clone(),
            service_line: row.shipment_service_line.clone(),
            amounts: shipment_amount(
                row.amount_qualifier.as_deref(),
                row.amount_value,
                row.amount_currency.as_deref(),
            )
            .map(|amount| vec![amount]),
            complementary_services: complementary_service(row).map(|service| vec![service]),
            charges: charges(row),
            container: row
                .container_reference
                .as_ref()
                .map(|reference| Container { reference: reference.clone() }),
            bill_of_lading_references: bill_of_lading_references(row),
            status: row.status_qualifier.as_ref().map(|qualifier| Status {
                qualifier: qualifier.clone(),
                event: row.status_event.clone(),
            }),
            orders: Vec::new(),
        },
    }
}

fn build_meta(row: &OrderInRow, services: &dyn Collaborators) -> Meta {
    let message_date = row.meta_message_date.unwrap_or_else(|| services.now());

    Meta {
        sender_id: row.meta_sender_id.clone(),
        receiver_id: RECEIVER_ID.to_string(),
        message_type: MESSAGE_TYPE.to_string(),
        message_date: services.format_timestamp(&message_date, MESSAGE_DATE_PATTERN),
        message_reference: row
            .meta_message_reference
            .clone()
            .unwrap_or_else(|| services.generate_id()),
        message_function: row.meta_message_function.clone(),
    }
}

// a creation message never carries the tour reference
fn tour_reference(row: &OrderInRow) -> Option<String> {
    match row.meta_message_function.as_deref() {
        Some(CREATION_MESSAGE_FUNCTION) => None,
        _ => row.shipment_reference.clone(),
    }
}

fn transport_service_buyers(row: &OrderInRow) -> Vec<TransportServiceBuyer> {
    // ZZ is mandatory, with an empty identifier when none was supplied
    let mut buyers = vec![TransportServiceBuyer {
        qualifier: DEFAULT_QUALIFIER.to_string(),
        identifier: row.transport_service_buyer_zz.clone().unwrap_or_default(),
    }];

    append_qualified(
        &mut buyers,
        [
            ("PF", row.transport_service_buyer_pf.as_deref(), Gate::NonBlank),
            ("VT", row.transport_service_buyer_vt.as_deref(), Gate::NonBlank),
            ("LD", row.transport_service_buyer_ld.as_deref(), Gate::Present),
        ],
        |qualifier, identifier| TransportServiceBuyer {
            qualifier: qualifier.to_string(),
            identifier: identifier.to_string(),
        },
    );

    buyers
}

fn complementary_service(row: &OrderInRow) -> Option<ComplementaryService> {
    let qualifier = row.complementary_service_qualifier.as_ref()?;

    Some(ComplementaryService {
        qualifier: qualifier.clone(),
        amount: row.complementary_service_amount,
        currency: row.complementary_service_currency.clone(),
        is_charge_free: row.complementary_service_is_charge_free,
        service_code: row.complementary_service_service_code.clone(),
        taxable_units_number: row.complementary_service_taxable_units_number,
        text: row.complementary_service_text.clone(),
    })
}

fn charges(row: &OrderInRow) -> Option<Charges> {
    let paiement = row.charge_paiement.as_ref()?;

    Some(Charges {
        paiement: paiement.clone(),
        analytical_account: row.charge_analytical_account.clone(),
        billing_account: row.charge_billing_account.clone(),
        cluster: row.charge_cluster.clone(),
        exemption: row.charge_exemption.clone(),
        incoterm_code: row.charge_incoterm_code.clone(),
        incoterm_location: row.charge_incoterm_location.clone(),
        service_charge: row.charge_service_charge.clone(),
        pre_invoice_line_item: row.charge_pre_invoice_line_item.clone(),
        taxable_units_number: row.charge_taxable_units_number,
        taxable_units_type: row.charge_taxable_units_type.clone(),
    })
}

fn bill_of_lading_references(row: &OrderInRow) -> Option<Vec<BillOfLadingReference>> {
    let mut references = Vec::new();

    append_qualified(
        &mut references,
        [
            ("MBL", row.bill_of_lading_reference_mbl.as_deref(), Gate::Present),
            ("HBL", row.bill_of_lading_reference_hbl.as_deref(), Gate::Present),
        ],
        |qualifier, reference| BillOfLadingReference {
            qualifier: qualifier.to_string(),
            reference: reference.to_string(),
        },
    );

    (!references.is_empty()).then_some(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{row::CarrierFlag, services::testing::FixedCollaborators};

    fn base_row() -> OrderInRow {
        OrderInRow {
            meta_sender_id: Some("SENDER".to_string()),
            shipment_reference: Some("TOUR-1".to_string()),
            shipment_technical_reference: Some("TECH-1".to_string()),
            shipment_type: Some("ROAD".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_message_date_and_reference_are_generated() {
        let services = FixedCollaborators::new();
        let doc = build_shipment(&base_row(), &services);

        assert_eq!(doc.meta.message_reference, "id-1");
        assert_eq!(doc.meta.message_date, "2024-03-01T12:00:00+0000");
        assert_eq!(doc.meta.receiver_id, "shippeo");
        assert_eq!(doc.meta.message_type, "GTF511");
        assert_eq!(doc.meta.sender_id.as_deref(), Some("SENDER"));
    }

    #[test]
    fn test_supplied_message_reference_is_kept() {
        let services = FixedCollaborators::new();
        let mut row = base_row();
        row.meta_message_reference = Some("MSG-9".to_string());
        row.meta_message_date = Some(services.now - chrono::Duration::days(1));

        let doc = build_shipment(&row, &services);
        assert_eq!(doc.meta.message_reference, "MSG-9");
        assert_eq!(doc.meta.message_date, "2024-02-29T12:00:00+0000");
    }

    #[test]
    fn test_tour_reference_omitted_on_creation_message() {
        let services = FixedCollaborators::new();
        let mut row = base_row();

        row.meta_message_function = Some("1".to_string());
        assert_eq!(build_shipment(&row, &services).shipment.tour_reference, None);

        row.meta_message_function = Some("9".to_string());
        assert_eq!(
            build_shipment(&row, &services).shipment.tour_reference.as_deref(),
            Some("TOUR-1")
        );
    }

    #[test]
    fn test_transport_service_buyer_gates() {
        let services = FixedCollaborators::new();
        let mut row = base_row();
        row.transport_service_buyer_pf = Some("   ".to_string());
        row.transport_service_buyer_vt = Some("VT-1".to_string());
        row.transport_service_buyer_ld = Some(String::new());

        let buyers = build_shipment(&row, &services).shipment.transport_service_buyers;
        let qualifiers: Vec<_> = buyers.iter().map(|b| b.qualifier.as_str()).collect();

        assert_eq!(qualifiers, vec!["ZZ", "VT", "LD"]);
        assert_eq!(buyers[0].identifier, "");
        assert_eq!(buyers[2].identifier, "");
    }

    #[test]
    fn test_carrier_resolution_is_applied() {
        let services = FixedCollaborators::new();
        let mut row = base_row();
        row.carrier_00 = CarrierFlag::True;
        row.carrier_identifier_sa = Some("SA-1".to_string());

        let carriers = build_shipment(&row, &services).shipment.carriers;
        assert_eq!(carriers.len(), 2);
        assert_eq!(carriers[0].qualifier, "00");
        assert_eq!(carriers[1].qualifier, "SA");
    }

    #[test]
    fn test_amount_dropped_for_other_currency() {
        let services = FixedCollaborators::new();
        let mut row = base_row();
        row.amount_qualifier = Some("TOT".to_string());
        row.amount_value = Some(120.5);
        row.amount_currency = Some("USD".to_string());
        assert!(build_shipment(&row, &services).shipment.amounts.is_none());

        row.amount_currency = Some("EUR".to_string());
        let amounts = build_shipment(&row, &services).shipment.amounts.unwrap();
        assert_eq!(amounts[0].value, Some(120.5));
    }

    #[test]
    fn test_optional_sections_follow_their_gates() {
        let services = FixedCollaborators::new();
        let bare = build_shipment(&base_row(), &services).shipment;
        assert!(bare.container.is_none());
        assert!(bare.bill_of_lading_references.is_none());
        assert!(bare.status.is_none());
        assert!(bare.charges.is_none());
        assert!(bare.complementary_services.is_none());
        assert!(bare.transport_means.is_none());

        let mut row = base_row();
        row.bill_of_lading_reference_hbl = Some("HBL-1".to_string());
        row.container_reference = Some("CONT-1".to_string());
        row.status_qualifier = Some("PLN".to_string());
        row.charge_paiement = Some("P".to_string());
        row.transport_mean_list = Some(Vec::new());

        let full = build_shipment(&row, &services).shipment;
        let bol = full.bill_of_lading_references.unwrap();
        assert_eq!(bol.len(), 1);
        assert_eq!(bol[0].qualifier, "HBL");
        assert_eq!(full.container.unwrap().reference, "CONT-1");
        assert_eq!(full.status.unwrap().event, None);
        assert_eq!(full.charges.unwrap().paiement, "P");
        assert!(full.transport_means.is_none());
    }
}
