//! Capability probe for the KDM hydrological telemetry API.
//!
//! The upstream service does not publish which (site, facility type,
//! measurement, granularity, lookback) combinations it supports; this crate
//! discovers the contract empirically. Candidate catalogs are fixed in
//! `catalog`, probes run strictly sequentially through `executor`, and
//! `report` folds the classified results into a console report.

pub mod catalog;
pub mod classify;
pub mod client;
pub mod config;
pub mod executor;
pub mod model;
pub mod report;
pub mod sweep;
