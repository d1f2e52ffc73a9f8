//! Reconciliation layer between `cgxeasy-api` and the command surfaces.
//!
//! - **[`Session`]** owns the authenticated controller client and both
//!   caches. [`connect()`](Session::connect) validates the token and
//!   resolves the tenant; every operation is an async method on the
//!   session that returns an [`OpResult`] instead of an error.
//!
//! - **[`ResourceCache`]** lazily builds name/id tables for sites and
//!   elements from one full listing per collection and never refreshes
//!   them on its own.
//!
//! - **[`InterfaceCache`]** holds the interface list of each
//!   (site, element) pair and is invalidated after every interface write.
//!
//! - **[`Command`]** describes one reconciliation request together with
//!   its target selection; [`Session::execute`] fans it out and collects a
//!   [`BatchReport`].

pub mod batch;
pub mod command;
pub mod config;
pub mod error;
pub mod matcher;
pub mod ops;
pub mod session;
pub mod store;
pub mod targets;

// ── Primary re-exports ──────────────────────────────────────────────
pub use batch::BatchReport;
pub use command::{Command, ElementTarget, SiteTarget};
pub use config::{ControllerConfig, TlsVerification};
pub use error::{CoreError, ErrorKind};
pub use matcher::{GrammarMatcher, OptionMatcher, SubstringMatcher};
pub use ops::dhcp::DhcpOptionSpec;
pub use ops::zone::{AttachAction, DetachAction, ZoneTransition, plan_zone_assignment};
pub use ops::{Change, OpResult};
pub use session::Session;
pub use store::{CollectionKey, Entity, InterfaceCache, ResourceCache};

// Controller models that appear in the public API.
pub use cgxeasy_api::models::{Element, Interface, Site, SnmpV3User};
