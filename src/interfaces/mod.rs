// src/interfaces/mod.rs
//! Interfaces for the optimistic rollup
//!
//! This module holds the seams between the rollup core and the outside
//! world: the rollup interface for shared-ownership callers, the asset
//! custodian the ledger settles against, and the event sink observers
//! subscribe through.

pub mod custodian_interface;
pub mod event_interface;
pub mod rollup_interface;

pub use custodian_interface::{AssetCustodian, InMemoryCustodian};
pub use event_interface::{EventSink, LogEventSink, RecordingEventSink};
pub use rollup_interface::{RollupInterface, RollupInterfaceImpl};
