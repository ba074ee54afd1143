//! HTTP handlers

pub mod payments;
