// src/key.rs

use std::fmt;
//
use crate::row::OrderInRow;

const ABSENT_SEGMENT: &str = "∅";

// segments compare one by one: absent never equals empty and splits cannot collide
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShipmentKey {
    pub shipment_reference: Option<String>,
    pub bill_of_lading_reference_mbl: Option<String>,
    pub container_reference: Option<String>,
    pub message_function: Option<String>,
    pub vin_sequence: Option<String>,
    pub transport_service_buyer_zz: Option<String>,
}

impl ShipmentKey {
    pub fn from_row(row: &OrderInRow) -> Self {
        Self {
            shipment_reference: row.shipment_reference.clone(),
            bill_of_lading_reference_mbl: row.bill_of_lading_reference_mbl.clone(),
            container_reference: row.container_reference.clone(),
            message_function: row.meta_message_function.clone(),
            vin_sequence: row.vin_sequence.clone(),
            transport_service_buyer_zz: row.transport_service_buyer_zz.clone(),
        }
    }
}

impl fmt::Display for ShipmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = [
            &self.shipment_reference,
            &self.bill_of_lading_reference_mbl,
            &self.container_reference,
            &self.message_function,
            &self.vin_sequence,
            &self.transport_service_buyer_zz,
        ];
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(segment.as_deref().unwrap_or(ABSENT_SEGMENT))?;
        }
        Ok(())
    }
}

// DQ reference, unique only inside its shipment
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderKey(pub Option<String>);

impl OrderKey {
    pub fn from_row(row: &OrderInRow) -> Self {
        Self(row.order_reference_dq.clone())
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}
