//! Core data models for xpense
//!
//! This module contains the data structures the engine operates on:
//! money amounts, flow directions, periods and transactions.

pub mod flow;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use flow::{Flow, TransferKind};
pub use ids::TransactionId;
pub use money::Money;
pub use period::Period;
pub use transaction::{CategoryName, RawAmount, RawTransaction, Transaction};
