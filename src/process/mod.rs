// src/process/mod.rs
mod inspector;

pub use inspector::{current_pid, InspectError, ProcessInspector, ProcessNiceness, SystemInspector};
