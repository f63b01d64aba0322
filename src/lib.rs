//! Stride - Personal Recurring Goal Tracker
//!
//! This crate implements goal declaration through a multi-turn chat dialog,
//! completion logging against a cutoff-aligned daily period, and an HTTP
//! query gateway for a companion front end.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
