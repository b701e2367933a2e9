//! Service layer - orchestration over the domain
//!
//! Services own the in-memory state for a program run and the ambient
//! concerns (event logging, demo data).

mod bank;
pub mod demo;
pub mod logging;

pub use bank::{AccountSummary, Bank, Receipt, Statement};
pub use demo::{DemoSeed, DEMO_CLIENT_ID};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
