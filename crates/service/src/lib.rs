//! Service layer: the document store adapter, the seed-and-serve resolver and
//! the per-endpoint services built on top of them.
//! - Store backends are interchangeable behind `storage::DocumentStore`.
//! - Services never fail on store errors; they degrade to built-in content.

pub mod errors;
pub mod storage;
pub mod resolver;
pub mod defaults;
pub mod services;
#[cfg(test)]
pub mod test_support;
