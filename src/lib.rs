//! DigiGold Reconciliation Engine
//!
//! This crate reconciles gold-purchase orders across three systems of
//! record - Finfinity (the internal order system), Cashfree (the payment
//! gateway) and Augmont (the gold-order provider) - and classifies every
//! order into an operational outcome with the action an operator should
//! take.
//!
//! The engine is purely in-process: it consumes three in-memory datasets
//! of named fields and returns an ordered collection of named result
//! tables. File parsing, HTTP transport and workbook rendering belong to
//! the embedding application.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod reconciliation;
