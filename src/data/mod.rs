//! Persistence layer.
//!
//! `Database` owns the canonical in-memory document and mirrors it to disk on every write.
//! Repositories wrap it with narrow, field-level accessors so services never touch the
//! document structure directly.

pub mod guild;
pub mod store;
pub mod user;

#[cfg(test)]
mod test;
