//! Wire types and client-side rules shared by the PULS console.
//!
//! Nothing here depends on the browser: the import validator, the
//! batch bookkeeping and the form rules are plain Rust and are tested
//! on the host.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
