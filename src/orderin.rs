// src/orderin.rs

use serde::{Deserialize, Serialize};

// fixed by the order-in schema
pub const RECEIVER_ID: &str = "shippeo";
pub const MESSAGE_TYPE: &str = "GTF511";
pub const CREATION_MESSAGE_FUNCTION: &str = "1";
pub const ACCEPTED_CURRENCY: &str = "EUR";
pub const DEFAULT_QUALIFIER: &str = "ZZ";
pub const COMMUNICATION_QUALIFIER: &str = "AL";

#[derive(Clone, Debug, Default, Serialize)]
pub struct RootOrderIn {
    pub meta: Meta,
    pub shipment: Shipment,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub sender_id: Option<String>,
    pub receiver_id: String,
    pub message_type: String,
    pub message_date: String,
    pub message_reference: String,
    pub message_function: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub technical_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_reference: Option<String>,
    #[serde(rename = "type")]
    pub shipment_type: Option<String>,
    pub transport_service_buyers: Vec<TransportServiceBuyer>,
    pub carriers: Vec<Carrier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_means: Option<Vec<TransportMean>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dangerous_goods: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_transport_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amounts: Option<Vec<Amount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complementary_services: Option<Vec<ComplementaryService>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charges: Option<Charges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_of_lading_references: Option<Vec<BillOfLadingReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub orders: Vec<Order>,
}

impl Shipment {
    pub fn order_position(&self, reference_dq: &str) -> Option<usize> {
        self.orders
            .iter()
            .position(|order| order.reference(QUALIFIER_DQ) == Some(reference_dq))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TransportServiceBuyer {
    pub qualifier: String,
    pub identifier: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Carrier {
    pub qualifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportMean {
    pub qualifier: Option<String>,
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trackable: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Amount {
    pub qualifier: Option<String>,
    pub value: Option<f64>,
    pub currency: String,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplementaryService {
    pub qualifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_charge_free: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable_units_number: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    pub paiement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytical_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exemption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoterm_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoterm_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_charge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_invoice_line_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable_units_number: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable_units_type: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Container {
    pub reference: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct BillOfLadingReference {
    pub qualifier: String,
    pub reference: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Status {
    pub qualifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

// order level and below

pub const QUALIFIER_DQ: &str = "DQ";

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub references: Vec<Reference>,
    pub pickup: Location,
    pub consignee: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packing: Option<Vec<Packing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returnable_packaging: Option<Vec<ReturnablePackaging>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_identification: Option<ClientIdentification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amounts: Option<Vec<Amount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_contacts: Option<Vec<NotificationContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dangerous_goods: Option<Vec<DangerousGood>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charges: Option<Charges>,
    pub goods_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handling_units: Option<Vec<HandlingUnit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_orders: Option<Vec<PurchaseOrder>>,
}

impl Order {
    pub fn reference(&self, qualifier: &str) -> Option<&str> {
        self.references
            .iter()
            .find(|r| r.qualifier == qualifier)
            .map(|r| r.reference.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reference {
    pub qualifier: String,
    pub reference: String,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifications: Option<Vec<Identification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub dates: Vec<ShippeoDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Identification {
    pub qualifier: String,
    pub identifier: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippeoDate {
    pub qualifier: String,
    pub date_time: String,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_load: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pallet_ground: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Packing {
    pub qualifier: Option<String>,
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_qualifier: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnablePackaging {
    #[serde(rename = "type")]
    pub packaging_type: String,
    pub number: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_item: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Tag {
    pub label: Option<String>,
    pub active: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Attribute {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ClientIdentification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContact {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_number: Option<CommunicationNumber>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationNumber {
    pub qualifier: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DangerousGood {
    pub adr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packing_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packing_instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_transport_authorisation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tunnel_restriction_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limited_quantity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excepted_quantity: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_weight: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlingUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging_qualifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_packaging_qualifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consignor_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consolidation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_references: Option<Vec<ContentReference>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContentReference {
    pub qualifier: String,
    pub reference: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
}
