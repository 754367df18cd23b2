// src/row.rs

use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::Bson;
use serde::{de::Error, Deserialize, Deserializer};
//
use crate::orderin::{Attribute, Item, Packing, PurchaseOrder, Tag, TransportMean};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderInRow {
    #[serde(alias = "orderInReference")]
    pub order_in_reference: Option<String>,

    // meta
    #[serde(alias = "meta_senderId")]
    pub meta_sender_id: Option<String>,
    #[serde(alias = "meta_messageDate", deserialize_with = "deserialize_timestamp")]
    pub meta_message_date: Option<DateTime<Utc>>,
    #[serde(alias = "meta_messageReference")]
    pub meta_message_reference: Option<String>,
    #[serde(alias = "meta_messageFunction")]
    pub meta_message_function: Option<String>,

    // shipment
    pub shipment_reference: Option<String>,
    #[serde(alias = "shipment_technicalReference")]
    pub shipment_technical_reference: Option<String>,
    pub shipment_type: Option<String>,
    #[serde(alias = "shipment_transportMode")]
    pub shipment_transport_mode: Option<String>,
    #[serde(alias = "shipment_isDangerousGoods")]
    pub shipment_is_dangerous_goods: Option<bool>,
    #[serde(alias = "shipment_nextTransportMode")]
    pub shipment_next_transport_mode: Option<String>,
    #[serde(alias = "shipment_tourType")]
    pub shipment_tour_type: Option<String>,
    #[serde(alias = "shipment_serviceLine")]
    pub shipment_service_line: Option<String>,
    #[serde(alias = "billOfLadingReference_MBL")]
    pub bill_of_lading_reference_mbl: Option<String>,
    #[serde(alias = "billOfLadingReference_HBL")]
    pub bill_of_lading_reference_hbl: Option<String>,
    pub container_reference: Option<String>,
    #[serde(alias = "VIN_Sequence")]
    pub vin_sequence: Option<String>,

    #[serde(alias = "transportservicebuyer_ZZidentifier")]
    pub transport_service_buyer_zz: Option<String>,
    #[serde(alias = "transportservicebuyer_PFidentifier")]
    pub transport_service_buyer_pf: Option<String>,
    #[serde(alias = "transportservicebuyer_VTidentifier")]
    pub transport_service_buyer_vt: Option<String>,
    #[serde(alias = "transportservicebuyer_LDidentifier")]
    pub transport_service_buyer_ld: Option<String>,

    #[serde(alias = "carrier_identifier00")]
    pub carrier_00: CarrierFlag,
    #[serde(alias = "carrier_identifierZZ")]
    pub carrier_identifier_zz: Option<String>,
    #[serde(alias = "carrier_identifierSA")]
    pub carrier_identifier_sa: Option<String>,

    #[serde(alias = "transportMean_list")]
    pub transport_mean_list: Option<Vec<TransportMean>>,

    pub amount_qualifier: Option<String>,
    pub amount_value: Option<f64>,
    pub amount_currency: Option<String>,

    #[serde(alias = "complementaryService_qualifier")]
    pub complementary_service_qualifier: Option<String>,
    #[serde(alias = "complementaryService_amount")]
    pub complementary_service_amount: Option<f64>,
    #[serde(alias = "complementaryService_currency")]
    pub complementary_service_currency: Option<String>,
    #[serde(alias = "complementaryService_isChargeFree")]
    pub complementary_service_is_charge_free: Option<bool>,
    #[serde(alias = "complementaryService_serviceCode")]
    pub complementary_service_service_code: Option<String>,
    #[serde(alias = "complementaryService_taxableUnitsNumber")]
    pub complementary_service_taxable_units_number: Option<f64>,
    #[serde(alias = "complementaryService_text")]
    pub complementary_service_text: Option<String>,

    pub charge_paiement: Option<String>,
    #[serde(alias = "charge_analyticalAccount")]
    pub charge_analytical_account: Option<String>,
    #[serde(alias = "charge_billingAccount")]
    pub charge_billing_account: Option<String>,
    pub charge_cluster: Option<String>,
    pub charge_exemption: Option<String>,
    #[serde(alias = "charge_incotermCode")]
    pub charge_incoterm_code: Option<String>,
    #[serde(alias = "charge_incotermLocation")]
    pub charge_incoterm_location: Option<String>,
    #[serde(alias = "charge_serviceCharge")]
    pub charge_service_charge: Option<String>,
    #[serde(alias = "charge_preInvoiceLineItem")]
    pub charge_pre_invoice_line_item: Option<String>,
    #[serde(alias = "charge_taxableUnitsNumber")]
    pub charge_taxable_units_number: Option<f64>,
    #[serde(alias = "charge_taxableUnitsType")]
    pub charge_taxable_units_type: Option<String>,

    pub status_qualifier: Option<String>,
    pub status_event: Option<String>,

    // order
    #[serde(alias = "order_reference_DQ")]
    pub order_reference_dq: Option<String>,
    #[serde(alias = "order_reference_ADL")]
    pub order_reference_adl: Option<String>,
    #[serde(alias = "order_reference_UCN")]
    pub order_reference_ucn: Option<String>,
    #[serde(alias = "order_reference_MA")]
    pub order_reference_ma: Option<String>,
    #[serde(alias = "order_reference_AAO")]
    pub order_reference_aao: Option<String>,
    #[serde(alias = "order_reference_ACN")]
    pub order_reference_acn: Option<String>,

    pub pickup_identifier: Option<String>,
    pub pickup_qualifier: Option<String>,
    pub pickup_name: Option<String>,
    pub pickup_address1: Option<String>,
    pub pickup_address2: Option<String>,
    pub pickup_country: Option<String>,
    #[serde(alias = "pickup_postalCode")]
    pub pickup_postal_code: Option<String>,
    pub pickup_city: Option<String>,
    pub pickup_latitude: Option<f64>,
    pub pickup_longitude: Option<f64>,
    pub pickup_instructions: Option<String>,
    pub pickup_appointment: Option<bool>,
    pub pickup_ownership: Option<String>,
    #[serde(alias = "pickup_activityTime")]
    pub pickup_activity_time: Option<f64>,
    pub pickup_state: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub pickup_date398: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub pickup_date474: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub pickup_date473: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub pickup_date510: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub pickup_date234: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub pickup_date235: Option<DateTime<Utc>>,

    pub consignee_identifier: Option<String>,
    pub consignee_qualifier: Option<String>,
    pub consignee_name: Option<String>,
    pub consignee_address1: Option<String>,
    pub consignee_address2: Option<String>,
    pub consignee_country: Option<String>,
    #[serde(alias = "consignee_postalCode")]
    pub consignee_postal_code: Option<String>,
    pub consignee_city: Option<String>,
    pub consignee_latitude: Option<f64>,
    pub consignee_longitude: Option<f64>,
    pub consignee_instructions: Option<String>,
    pub consignee_appointment: Option<bool>,
    pub consignee_ownership: Option<String>,
    #[serde(alias = "consignee_activityTime")]
    pub consignee_activity_time: Option<f64>,
    pub consignee_state: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub consignee_date17: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub consignee_date474: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub consignee_date473: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub consignee_date64: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub consignee_date63: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub consignee_date2: Option<DateTime<Utc>>,

    #[serde(alias = "quantity_fullLoad")]
    pub quantity_full_load: Option<bool>,
    #[serde(alias = "quantity_grossVolume")]
    pub quantity_gross_volume: Option<f64>,
    #[serde(alias = "quantity_grossWeight")]
    pub quantity_gross_weight: Option<f64>,
    #[serde(alias = "quantity_loadingMeters")]
    pub quantity_loading_meters: Option<f64>,
    #[serde(alias = "quantity_palletGround")]
    pub quantity_pallet_ground: Option<f64>,

    pub packing_list: Option<Vec<Packing>>,

    #[serde(alias = "returnablePacking_type")]
    pub returnable_packing_type: Option<String>,
    #[serde(alias = "returnablePacking_number")]
    pub returnable_packing_number: Option<f64>,
    #[serde(alias = "returnablePacking_customType")]
    pub returnable_packing_custom_type: Option<String>,
    #[serde(alias = "returnablePacking_productReference")]
    pub returnable_packing_product_reference: Option<String>,
    #[serde(alias = "returnablePacking_productDescription")]
    pub returnable_packing_product_description: Option<String>,
    #[serde(alias = "returnablePacking_productItem")]
    pub returnable_packing_product_item: Option<String>,

    pub tag_list: Option<Vec<Tag>>,
    pub attribute_list: Option<Vec<Attribute>>,

    #[serde(alias = "clientIdentification_organization")]
    pub client_identification_organization: Option<String>,
    #[serde(alias = "clientIdentification_agency")]
    pub client_identification_agency: Option<String>,

    pub order_amount_qualifier: Option<String>,
    pub order_amount_value: Option<f64>,
    pub order_amount_currency: Option<String>,

    #[serde(alias = "notificationContact_name")]
    pub notification_contact_name: Option<String>,
    #[serde(alias = "notificationContact_value")]
    pub notification_contact_value: Option<String>,
    #[serde(alias = "notificationContact_email")]
    pub notification_contact_email: Option<String>,
    #[serde(alias = "notificationContact_countryCode")]
    pub notification_contact_country_code: Option<String>,

    #[serde(alias = "dangerousGoods_ADR")]
    pub dangerous_goods_adr: Option<String>,
    #[serde(alias = "dangerousGoods_class")]
    pub dangerous_goods_class: Option<String>,
    #[serde(alias = "dangerousGoods_classificationCode")]
    pub dangerous_goods_classification_code: Option<String>,
    #[serde(alias = "dangerousGoods_UNDG")]
    pub dangerous_goods_undg: Option<String>,
    #[serde(alias = "dangerousGoods_packingGroup")]
    pub dangerous_goods_packing_group: Option<String>,
    #[serde(alias = "dangerousGoods_packingInstruction")]
    pub dangerous_goods_packing_instruction: Option<String>,
    #[serde(alias = "dangerousGoods_cargoTransportAuthorisation")]
    pub dangerous_goods_cargo_transport_authorisation: Option<String>,
    #[serde(alias = "dangerousGoods_tunnelRestrictionCode")]
    pub dangerous_goods_tunnel_restriction_code: Option<String>,
    #[serde(alias = "dangerousGoods_grossWeight")]
    pub dangerous_goods_gross_weight: Option<f64>,
    #[serde(alias = "dangerousGoods_limitedQuantity")]
    pub dangerous_goods_limited_quantity: Option<bool>,
    #[serde(alias = "dangerousGoods_exceptedQuantity")]
    pub dangerous_goods_excepted_quantity: Option<bool>,

    pub order_charge_paiement: Option<String>,
    #[serde(alias = "order_charge_analyticalAccount")]
    pub order_charge_analytical_account: Option<String>,
    #[serde(alias = "order_charge_billingAccount")]
    pub order_charge_billing_account: Option<String>,
    pub order_charge_cluster: Option<String>,
    pub order_charge_exemption: Option<String>,
    #[serde(alias = "order_charge_incotermCode")]
    pub order_charge_incoterm_code: Option<String>,
    #[serde(alias = "order_charge_incotermLocation")]
    pub order_charge_incoterm_location: Option<String>,
    #[serde(alias = "order_charge_serviceCharge")]
    pub order_charge_service_charge: Option<String>,
    #[serde(alias = "order_charge_preInvoiceLineItem")]
    pub order_charge_pre_invoice_line_item: Option<String>,
    #[serde(alias = "order_charge_taxableUnitsNumber")]
    pub order_charge_taxable_units_number: Option<f64>,
    #[serde(alias = "order_charge_taxableUnitsType")]
    pub order_charge_taxable_units_type: Option<String>,

    #[serde(alias = "goodsDescription")]
    pub goods_description: Option<String>,
    pub item_list: Option<Vec<Item>>,

    // handling unit
    #[serde(alias = "handlingUnit_trackingCode")]
    pub handling_unit_tracking_code: Option<String>,
    #[serde(alias = "handlingUnit_barcode")]
    pub handling_unit_barcode: Option<String>,
    #[serde(alias = "handlingUnit_packagingQualifier")]
    pub handling_unit_packaging_qualifier: Option<String>,
    #[serde(alias = "handlingUnit_customPackagingQualifier")]
    pub handling_unit_custom_packaging_qualifier: Option<String>,
    #[serde(alias = "handlingUnit_consignorReference")]
    pub handling_unit_consignor_reference: Option<String>,
    #[serde(alias = "handlingUnit_consolidationId")]
    pub handling_unit_consolidation_id: Option<String>,
    #[serde(alias = "handlingUnit_grossWeight")]
    pub handling_unit_gross_weight: Option<f64>,
    #[serde(alias = "handlingUnit_grossVolume")]
    pub handling_unit_gross_volume: Option<f64>,
    #[serde(alias = "handlingUnit_width")]
    pub handling_unit_width: Option<f64>,
    #[serde(alias = "handlingUnit_length")]
    pub handling_unit_length: Option<f64>,
    #[serde(alias = "handlingUnit_height")]
    pub handling_unit_height: Option<f64>,
    #[serde(alias = "handlingUnit_trackingUrl")]
    pub handling_unit_tracking_url: Option<String>,
    #[serde(alias = "handlingUnit_contentReferences_item")]
    pub handling_unit_content_reference_item: Option<String>,
    #[serde(alias = "handlingUnit_contentReferences_purchaseOrder")]
    pub handling_unit_content_reference_purchase_order: Option<String>,

    #[serde(alias = "purchaseOrder_list")]
    pub purchase_order_list: Option<Vec<PurchaseOrder>>,
}

// dates arrive either as native BSON dates or as RFC 3339 strings
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::DateTime(value)) => Utc
            .timestamp_millis_opt(value.timestamp_millis())
            .single()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("date out of range: {value}"))),
        Some(Bson::String(text)) => DateTime::parse_from_rfc3339(&text)
            .map(|date| Some(date.with_timezone(&Utc)))
            .map_err(D::Error::custom),
        Some(other) => Err(D::Error::custom(format!("expected a date, found {other}"))),
    }
}

// carrier_identifier00 arrives as null, a boolean, a number or a string holding a boolean
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CarrierFlag {
    #[default]
    Absent,
    False,
    True,
}

impl CarrierFlag {
    fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            CarrierFlag::Absent
        } else if text.eq_ignore_ascii_case("true") || text == "1" {
            CarrierFlag::True
        } else {
            CarrierFlag::False
        }
    }

    pub fn is_set(self) -> bool {
        self == CarrierFlag::True
    }
}

impl<'de> Deserialize<'de> for CarrierFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Number(i64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => CarrierFlag::Absent,
            Some(Raw::Flag(true)) => CarrierFlag::True,
            Some(Raw::Flag(false)) => CarrierFlag::False,
            Some(Raw::Number(0)) => CarrierFlag::False,
            Some(Raw::Number(_)) => CarrierFlag::True,
            Some(Raw::Text(text)) => CarrierFlag::from_text(&text),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentificationGate {
    Identifier,
    Qualifier,
}

// borrowed view over the pickup or consignee columns of a row
pub struct LocationColumns<'a> {
    pub identification_gate: IdentificationGate,
    pub identifier: Option<&'a str>,
    pub qualifier: Option<&'a str>,
    pub name: Option<&'a str>,
    pub address1: Option<&'a str>,
    pub address2: Option<&'a str>,
    pub country: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub city: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub instructions: Option<&'a str>,
    pub appointment: Option<bool>,
    pub ownership: Option<&'a str>,
    pub activity_time: Option<f64>,
    pub state: Option<&'a str>,
    pub dates: Vec<(&'static str, Option<&'a DateTime<Utc>>)>,
}

impl OrderInRow {
    pub fn pickup(&self) -> LocationColumns<'_> {
        LocationColumns {
            identification_gate: IdentificationGate::Identifier,
            identifier: self.pickup_identifier.as_deref(),
            qualifier: self.pickup_qualifier.as_deref(),
            name: self.pickup_name.as_deref(),
            address1: self.pickup_address1.as_deref(),
            address2: self.pickup_address2.as_deref(),
            country: self.pickup_country.as_deref(),
            postal_code: self.pickup_postal_code.as_deref(),
            city: self.pickup_city.as_deref(),
            latitude: self.pickup_latitude,
            longitude: self.pickup_longitude,
            instructions: self.pickup_instructions.as_deref(),
            appointment: self.pickup_appointment,
            ownership: self.pickup_ownership.as_deref(),
            activity_time: self.pickup_activity_time,
            state: self.pickup_state.as_deref(),
            dates: vec![
                ("398", self.pickup_date398.as_ref()),
                ("474", self.pickup_date474.as_ref()),
                ("473", self.pickup_date473.as_ref()),
                ("510", self.pickup_date510.as_ref()),
                ("234", self.pickup_date234.as_ref()),
                ("235", self.pickup_date235.as_ref()),
            ],
        }
    }

    pub fn consignee(&self) -> LocationColumns<'_> {
        LocationColumns {
            identification_gate: IdentificationGate::Qualifier,
            identifier: self.consignee_identifier.as_deref(),
            qualifier: self.consignee_qualifier.as_deref(),
            name: self.consignee_name.as_deref(),
            address1: self.consignee_address1.as_deref(),
            address2: self.consignee_address2.as_deref(),
            country: self.consignee_country.as_deref(),
            postal_code: self.consignee_postal_code.as_deref(),
            city: self.consignee_city.as_deref(),
            latitude: self.consignee_latitude,
            longitude: self.consignee_longitude,
            instructions: self.consignee_instructions.as_deref(),
            appointment: self.consignee_appointment,
            ownership: self.consignee_ownership.as_deref(),
            activity_time: self.consignee_activity_time,
            state: self.consignee_state.as_deref(),
            dates: vec![
                ("17", self.consignee_date17.as_ref()),
                ("474", self.consignee_date474.as_ref()),
                ("473", self.consignee_date473.as_ref()),
                ("64", self.consignee_date64.as_ref()),
                ("63", self.consignee_date63.as_ref()),
                ("2", self.consignee_date2.as_ref()),
            ],
        }
    }

    pub fn has_handling_unit(&self) -> bool {
        self.handling_unit_tracking_code.is_some() || self.handling_unit_packaging_qualifier.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(value: serde_json::Value) -> CarrierFlag {
        let row: OrderInRow =
            serde_json::from_value(serde_json::json!({ "carrier_identifier00": value })).unwrap();
        row.carrier_00
    }

    #[test]
    fn test_carrier_flag_three_states() {
        assert_eq!(flag(serde_json::Value::Null), CarrierFlag::Absent);
        assert_eq!(flag(serde_json::json!("")), CarrierFlag::Absent);
        assert_eq!(flag(serde_json::json!(true)), CarrierFlag::True);
        assert_eq!(flag(serde_json::json!("true")), CarrierFlag::True);
        assert_eq!(flag(serde_json::json!(false)), CarrierFlag::False);
        assert_eq!(flag(serde_json::json!("no")), CarrierFlag::False);
        assert_eq!(flag(serde_json::json!(1)), CarrierFlag::True);
        assert_eq!(flag(serde_json::json!(0)), CarrierFlag::False);
        assert!(!CarrierFlag::Absent.is_set());
    }

    #[test]
    fn test_missing_carrier_flag_is_absent() {
        let row: OrderInRow = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(row.carrier_00, CarrierFlag::Absent);
    }

    #[test]
    fn test_source_column_names_are_accepted() {
        let row: OrderInRow = serde_json::from_value(serde_json::json!({
            "VIN_Sequence": "V1",
            "transportservicebuyer_ZZidentifier": "TSB",
            "order_reference_DQ": "DQ-1",
            "handlingUnit_trackingCode": "HU-1",
            "pickup_date398": "2024-03-01T08:30:00Z",
        }))
        .unwrap();

        assert_eq!(row.vin_sequence.as_deref(), Some("V1"));
        assert_eq!(row.transport_service_buyer_zz.as_deref(), Some("TSB"));
        assert_eq!(row.order_reference_dq.as_deref(), Some("DQ-1"));
        assert!(row.has_handling_unit());
        assert!(row.pickup().dates[0].1.is_some());
    }
}
