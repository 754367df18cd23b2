// src/lib.rs

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handling_unit;
pub mod key;
pub mod normalize;
pub mod order;
pub mod orderin;
pub mod row;
pub mod services;
pub mod shipment;
