// src/order.rs

use crate::{
    normalize::{append_qualified, identification, order_amount, split_address, truncate_name, Gate},
    orderin::{
        Charges, ClientIdentification, CommunicationNumber, DangerousGood, Location,
        NotificationContact, Order, Quantity, Reference, ReturnablePackaging, ShippeoDate,
        COMMUNICATION_QUALIFIER, QUALIFIER_DQ,
    },
    row::{IdentificationGate, LocationColumns, OrderInRow},
    services::{Collaborators, LOCATION_DATE_PATTERN},
};

pub fn build_order(row: &OrderInRow, services: &dyn Collaborators) -> Order {
    Order {
        references: references(row),
        pickup: build_location(&row.pickup(), services),
        consignee: build_location(&row.consignee(), services),
        quantity: quantity(row),
        packing: row.packing_list.clone().filter(|list| !list.is_empty()),
        returnable_packaging: returnable_packaging(row).map(|packaging| vec![packaging]),
        tags: row.tag_list.clone().filter(|list| !list.is_empty()),
        attributes: row.attribute_list.clone().filter(|list| !list.is_empty()),
        client_identification: client_identification(row),
        amounts: order_amount(
            row.order_amount_qualifier.as_deref(),
            row.order_amount_value,
            row.order_amount_currency.as_deref(),
        )
        .map(|amount| vec![amount]),
        notification_contacts: notification_contact(row).map(|contact| vec![contact]),
        dangerous_goods: dangerous_good(row).map(|good| vec![good]),
        charges: charges(row),
        goods_description: row.goods_description.clone(),
        items: row.item_list.clone().filter(|list| !list.is_empty()),
        handling_units: None,
        purchase_orders: None,
    }
}

fn references(row: &OrderInRow) -> Vec<Reference> {
    let mut references = Vec::new();

    append_qualified(
        &mut references,
        [
            (QUALIFIER_DQ, row.order_reference_dq.as_deref(), Gate::Present),
            ("ADL", row.order_reference_adl.as_deref(), Gate::NonEmpty),
            ("UCN", row.order_reference_ucn.as_deref(), Gate::NonEmpty),
            ("MA", row.order_reference_ma.as_deref(), Gate::NonEmpty),
            ("AAO", row.order_reference_aao.as_deref(), Gate::NonEmpty),
            ("ACN", row.order_reference_acn.as_deref(), Gate::NonEmpty),
        ],
        |qualifier, reference| Reference {
            qualifier: qualifier.to_string(),
            reference: reference.to_string(),
        },
    );

    references
}

pub fn build_location(columns: &LocationColumns<'_>, services: &dyn Collaborators) -> Location {
    let has_identification = match columns.identification_gate {
        IdentificationGate::Identifier => columns.identifier.is_some(),
        IdentificationGate::Qualifier => columns.qualifier.is_some(),
    };
    let (address1, address2) = split_address(columns.address1, columns.address2);

    let mut dates = Vec::new();
    append_qualified(
        &mut dates,
        columns
            .dates
            .iter()
            .map(|(qualifier, value)| (*qualifier, *value, Gate::Present)),
        |qualifier, value| ShippeoDate {
            qualifier: qualifier.to_string(),
            date_time: services.format_timestamp(value, LOCATION_DATE_PATTERN),
        },
    );

    Location {
        identifications: has_identification
            .then(|| vec![identification(columns.qualifier, columns.identifier)]),
        name: truncate_name(columns.name),
        address1,
        address2,
        country: columns.country.map(str::to_string),
        postal_code: columns.postal_code.map(str::to_string),
        city: columns.city.map(str::to_string),
        latitude: columns.latitude,
        longitude: columns.longitude,
        instructions: columns.instructions.map(str::to_string),
        appointment: columns.appointment,
        ownership: columns.ownership.map(str::to_string),
        activity_time: columns.activity_time,
        state: columns.state.map(str::to_string),
        dates,
    }
}

fn quantity(row: &OrderInRow) -> Option<Quantity> {
    let any_present = row.quantity_full_load.is_some()
        || row.quantity_gross_volume.is_some()
        || row.quantity_gross_weight.is_some()
        || row.quantity_loading_meters.is_some()
        || row.quantity_pallet_ground.is_some();

    any_present.then(|| Quantity {
        full_load: row.quantity_full_load,
        gross_volume: row.quantity_gross_volume,
        gross_weight: row.quantity_gross_weight,
        loading_meters: row.quantity_loading_meters,
        pallet_ground: row.quantity_pallet_ground,
    })
}

fn returnable_packaging(row: &OrderInRow) -> Option<ReturnablePackaging> {
    let (Some(packaging_type), Some(number)) =
        (row.returnable_packing_type.as_ref(), row.returnable_packing_number)
    else {
        return None;
    };

    Some(ReturnablePackaging {
        packaging_type: packaging_type.clone(),
        number,
        custom_type: row.returnable_packing_custom_type.clone(),
        product_reference: row.returnable_packing_product_reference.clone(),
        product_description: row.returnable_packing_product_description.clone(),
        product_item: row.returnable_packing_product_item.clone(),
    })
}

fn client_identification(row: &OrderInRow) -> Option<ClientIdentification> {
    if row.client_identification_organization.is_none() && row.client_identification_agency.is_none()
    {
        return None;
    }

    Some(ClientIdentification {
        organization: row.client_identification_organization.clone(),
        agency: row.client_identification_agency.clone(),
    })
}

fn notification_contact(row: &OrderInRow) -> Option<NotificationContact> {
    let name = row.notification_contact_name.as_ref()?;
    if row.notification_contact_value.is_none() && row.notification_contact_email.is_none() {
        return None;
    }

    Some(NotificationContact {
        name: name.clone(),
        email: row.notification_contact_email.clone(),
        communication_number: row.notification_contact_value.as_ref().map(|value| {
            CommunicationNumber {
                qualifier: COMMUNICATION_QUALIFIER.to_string(),
                value: value.clone(),
                country_code: row.notification_contact_country_code.clone(),
            }
        }),
    })
}

fn dangerous_good(row: &OrderInRow) -> Option<DangerousGood> {
    let adr = row.dangerous_goods_adr.as_ref()?;

    Some(DangerousGood {
        adr: adr.clone(),
        class: row.dangerous_goods_class.clone(),
        classification_code: row.dangerous_goods_classification_code.clone(),
        undg: row.dangerous_goods_undg.clone(),
        packing_group: row.dangerous_goods_packing_group.clone(),
        packing_instruction: row.dangerous_goods_packing_instruction.clone(),
        cargo_transport_authorisation: row.dangerous_goods_cargo_transport_authorisation.clone(),
        tunnel_restriction_code: row.dangerous_goods_tunnel_restriction_code.clone(),
        gross_weight: row.dangerous_goods_gross_weight,
        limited_quantity: row.dangerous_goods_limited_quantity,
        excepted_quantity: row.dangerous_goods_excepted_quantity,
    })
}

fn charges(row: &OrderInRow) -> Option<Charges> {
    let paiement = row.order_charge_paiement.as_ref()?;

    Some(Charges {
        paiement: paiement.clone(),
        analytical_account: row.order_charge_analytical_account.clone(),
        billing_account: row.order_charge_billing_account.clone(),
        cluster: row.order_charge_cluster.clone(),
        exemption: row.order_charge_exemption.clone(),
        incoterm_code: row.order_charge_incoterm_code.clone(),
        incoterm_location: row.order_charge_incoterm_location.clone(),
        service_charge: row.order_charge_service_charge.clone(),
        pre_invoice_line_item: row.order_charge_pre_invoice_line_item.clone(),
        taxable_units_number: row.order_charge_taxable_units_number,
        taxable_units_type: row.order_charge_taxable_units_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{orderin::Tag, services::testing::FixedCollaborators};

    fn dq_row(dq: &str) -> OrderInRow {
        OrderInRow {
            order_reference_dq: Some(dq.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_references_dq_first_then_non_empty_optionals() {
        let mut row = dq_row("DQ-1");
        row.order_reference_adl = Some(String::new());
        row.order_reference_ma = Some("MA-1".to_string());
        row.order_reference_acn = Some("ACN-1".to_string());

        let order = build_order(&row, &FixedCollaborators::new());
        let qualifiers: Vec<_> = order.references.iter().map(|r| r.qualifier.as_str()).collect();
        assert_eq!(qualifiers, vec!["DQ", "MA", "ACN"]);
        assert_eq!(order.reference("DQ"), Some("DQ-1"));
    }

    #[test]
    fn test_empty_row_still_has_locations_and_description() {
        let order = build_order(&OrderInRow::default(), &FixedCollaborators::new());

        assert!(order.references.is_empty());
        assert!(order.pickup.dates.is_empty());
        assert!(order.pickup.identifications.is_none());
        assert!(order.consignee.dates.is_empty());
        assert!(order.goods_description.is_none());
        assert!(order.quantity.is_none());
        assert!(order.handling_units.is_none());
    }

    #[test]
    fn test_location_normalisation() {
        let mut row = dq_row("DQ-1");
        row.pickup_name = Some("N".repeat(40));
        row.pickup_address1 = Some(format!("{}{}", "a".repeat(35), "tail!"));
        row.pickup_identifier = Some("PK-1".to_string());
        row.pickup_qualifier = Some(String::new());

        let pickup = build_order(&row, &FixedCollaborators::new()).pickup;
        assert_eq!(pickup.name.unwrap().len(), 35);
        assert_eq!(pickup.address1.unwrap(), "a".repeat(35));
        assert_eq!(pickup.address2.as_deref(), Some("tail!"));

        let identifications = pickup.identifications.unwrap();
        assert_eq!(identifications[0].qualifier, "ZZ");
        assert_eq!(identifications[0].identifier.as_deref(), Some("PK-1"));
    }

    #[test]
    fn test_consignee_identification_follows_qualifier() {
        let mut row = dq_row("DQ-1");
        row.consignee_identifier = Some("CN-1".to_string());
        let order = build_order(&row, &FixedCollaborators::new());
        assert!(order.consignee.identifications.is_none());

        row.consignee_identifier = None;
        row.consignee_qualifier = Some(String::new());
        let identifications = build_order(&row, &FixedCollaborators::new())
            .consignee
            .identifications
            .unwrap();
        assert_eq!(identifications[0].qualifier, "ZZ");
        assert_eq!(identifications[0].identifier, None);
    }

    #[test]
    fn test_location_dates_keep_table_order() {
        let mut row = dq_row("DQ-1");
        row.consignee_date2 = Some(Utc.with_ymd_and_hms(2024, 3, 4, 16, 0, 0).unwrap());
        row.consignee_date17 = Some(Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap());
        row.pickup_date510 = Some(Utc.with_ymd_and_hms(2024, 3, 2, 7, 15, 0).unwrap());

        let order = build_order(&row, &FixedCollaborators::new());
        let consignee: Vec<_> = order.consignee.dates.iter().map(|d| d.qualifier.as_str()).collect();
        assert_eq!(consignee, vec!["17", "2"]);
        assert_eq!(order.pickup.dates[0].qualifier, "510");
        assert_eq!(order.pickup.dates[0].date_time, "2024-03-02T07:15:00Z");
    }

    #[test]
    fn test_notification_contact() {
        let mut row = dq_row("DQ-1");
        row.notification_contact_name = Some("Jo".to_string());
        assert!(build_order(&row, &FixedCollaborators::new()).notification_contacts.is_none());

        row.notification_contact_email = Some("jo@example.com".to_string());
        let contact = build_order(&row, &FixedCollaborators::new()).notification_contacts.unwrap();
        assert!(contact[0].communication_number.is_none());

        row.notification_contact_value = Some("+33600000000".to_string());
        row.notification_contact_country_code = Some("33".to_string());
        let contact = build_order(&row, &FixedCollaborators::new()).notification_contacts.unwrap();
        let number = contact[0].communication_number.as_ref().unwrap();
        assert_eq!(number.qualifier, "AL");
        assert_eq!(number.country_code.as_deref(), Some("33"));
    }

    #[test]
    fn test_conditional_sections() {
        let mut row = dq_row("DQ-1");
        row.quantity_pallet_ground = Some(2.0);
        row.returnable_packing_type = Some("EUR-PAL".to_string());
        row.dangerous_goods_adr = Some("ADR".to_string());
        row.client_identification_agency = Some("AG".to_string());
        row.order_amount_qualifier = Some("TOT".to_string());
        row.order_amount_value = Some(5.0);
        row.order_amount_currency = Some("EUR".to_string());
        row.tag_list = Some(vec![Tag { label: Some("fragile".to_string()), active: Some(true) }]);
        row.goods_description = Some("spare parts".to_string());

        let order = build_order(&row, &FixedCollaborators::new());
        assert_eq!(order.quantity.unwrap().pallet_ground, Some(2.0));
        // type without number is not enough
        assert!(order.returnable_packaging.is_none());
        assert_eq!(order.dangerous_goods.unwrap().len(), 1);
        assert!(order.client_identification.unwrap().organization.is_none());
        assert_eq!(order.amounts.unwrap().len(), 1);
        assert_eq!(order.tags.unwrap().len(), 1);
        assert_eq!(order.goods_description.as_deref(), Some("spare parts"));
    }
}
