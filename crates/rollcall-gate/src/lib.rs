//! Resource gates for rollcall.
//!
//! Each resource domain (contributor records, images) has one gate. Any
//! sequence that reads a resource and then conditionally writes it runs
//! while holding that domain's gate, so those sequences are totally ordered
//! per domain. The gates are independent: holding one never blocks the
//! other.
//!
//! Gates are owned by the service instance and injected into the façades,
//! so every test can build an isolated pair.
//!
//! # Quick Start
//!
//! ```rust
//! use rollcall_gate::{Domain, Gates};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let gates = Gates::new();
//! {
//!     let _held = gates.gate(Domain::Contributors).enter().await;
//!     // read, check, write
//! } // released here, on every exit path
//! assert!(gates.images.try_enter().is_some());
//! # });
//! ```

pub mod gate;

pub use gate::{Domain, GateGuard, Gates, ResourceGate};
