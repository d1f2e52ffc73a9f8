// ── Client-side lookup caches ──
//
// Both caches live inside a `Session`; nothing here is global.

mod interface_cache;
mod resource_cache;

pub use interface_cache::InterfaceCache;
pub use resource_cache::{CollectionKey, Entity, ResourceCache};
