//! Inbound adapters that translate external requests into domain calls.
//!
//! Framework details stay here; handlers only speak to the driving ports.

pub mod http;
