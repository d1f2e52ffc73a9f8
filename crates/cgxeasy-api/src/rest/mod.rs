// Controller REST client modules
//
// Hand-written client for the tenant-scoped controller endpoints used by
// the reconciliation layer. Collections are wrapped in `{ items: [...] }`;
// failures in `{ _error: [{ code, message }] }`.

pub mod auth;
pub mod client;
pub mod dhcp;
pub mod interfaces;
pub mod models;
pub mod prefixes;
pub mod security;
pub mod sites;
pub mod snmp;
pub mod wan;

pub use client::CgxClient;
