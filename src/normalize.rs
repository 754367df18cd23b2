// src/normalize.rs

use chrono::{DateTime, Utc};
//
use crate::{
    orderin::{Amount, Carrier, Identification, ACCEPTED_CURRENCY, DEFAULT_QUALIFIER},
    row::CarrierFlag,
};

pub const FIELD_WIDTH: usize = 35;
pub const ADDRESS_SPLIT_LIMIT: usize = 70;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Present,
    NonEmpty,
    NonBlank,
}

pub trait FieldValue {
    // None means only presence matters
    fn as_text(&self) -> Option<&str> {
        None
    }
}

impl FieldValue for &str {
    fn as_text(&self) -> Option<&str> {
        Some(*self)
    }
}

impl FieldValue for &DateTime<Utc> {}

impl Gate {
    pub fn admits<V: FieldValue>(self, value: &Option<V>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match (self, value.as_text()) {
            (Gate::Present, _) | (_, None) => true,
            (Gate::NonEmpty, Some(text)) => !text.is_empty(),
            (Gate::NonBlank, Some(text)) => !text.trim().is_empty(),
        }
    }
}

// (qualifier, source value, inclusion rule)
pub type QualifiedField<V> = (&'static str, Option<V>, Gate);

/// Appends one built entry per table row whose gate holds, in table order.
pub fn append_qualified<V, T>(
    list: &mut Vec<T>,
    fields: impl IntoIterator<Item = QualifiedField<V>>,
    mut build: impl FnMut(&'static str, V) -> T,
) where
    V: FieldValue,
{
    for (qualifier, value, gate) in fields {
        if !gate.admits(&value) {
            continue;
        }
        if let Some(value) = value {
            list.push(build(qualifier, value));
        }
    }
}

fn take_chars(value: &str, from: usize, to: usize) -> String {
    value.chars().skip(from).take(to.saturating_sub(from)).collect()
}

pub fn truncate_name(name: Option<&str>) -> Option<String> {
    name.map(|name| take_chars(name, 0, FIELD_WIDTH))
}

// length split first, then a supplied line 2 overrides
pub fn split_address(
    address1: Option<&str>,
    address2: Option<&str>,
) -> (Option<String>, Option<String>) {
    let Some(line1) = address1 else {
        return (None, None);
    };

    let explicit_line2 = address2.filter(|line2| !line2.is_empty());
    let length = line1.chars().count();

    let (mut out1, mut out2) = (None, None);
    if length <= FIELD_WIDTH {
        out1 = Some(line1.to_string());
    } else if explicit_line2.is_none() {
        out1 = Some(take_chars(line1, 0, FIELD_WIDTH));
        out2 = Some(take_chars(line1, FIELD_WIDTH, length.min(ADDRESS_SPLIT_LIMIT)));
    }
    if let Some(line2) = explicit_line2 {
        out2 = Some(line2.to_string());
    }

    (out1, out2)
}

pub fn identification(qualifier: Option<&str>, identifier: Option<&str>) -> Identification {
    let qualifier = match qualifier {
        Some(qualifier) if !qualifier.is_empty() => qualifier,
        _ => DEFAULT_QUALIFIER,
    };
    Identification {
        qualifier: qualifier.to_string(),
        identifier: identifier.map(str::to_string),
    }
}

// exactly one primary carrier, "00" or "ZZ", plus "SA" when supplied
pub fn resolve_carriers(
    flag: CarrierFlag,
    identifier_zz: Option<&str>,
    identifier_sa: Option<&str>,
) -> Vec<Carrier> {
    let mut carriers = Vec::with_capacity(2);

    if flag.is_set() {
        carriers.push(Carrier { qualifier: "00".to_string(), identifier: None });
    } else {
        carriers.push(Carrier {
            qualifier: DEFAULT_QUALIFIER.to_string(),
            identifier: identifier_zz.map(str::to_string),
        });
    }

    if let Some(identifier) = identifier_sa {
        carriers.push(Carrier {
            qualifier: "SA".to_string(),
            identifier: Some(identifier.to_string()),
        });
    }

    carriers
}

pub fn currency_accepted(currency: Option<&str>) -> bool {
    currency == Some(ACCEPTED_CURRENCY)
}

pub fn shipment_amount(
    qualifier: Option<&str>,
    value: Option<f64>,
    currency: Option<&str>,
) -> Option<Amount> {
    currency_accepted(currency).then(|| Amount {
        qualifier: qualifier.map(str::to_string),
        value,
        currency: ACCEPTED_CURRENCY.to_string(),
    })
}

pub fn order_amount(
    qualifier: Option<&str>,
    value: Option<f64>,
    currency: Option<&str>,
) -> Option<Amount> {
    match (qualifier, value) {
        (Some(_), Some(_)) => shipment_amount(qualifier, value, currency),
        _ => None,
    }
}
