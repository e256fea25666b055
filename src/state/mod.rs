//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns the synchronous store and its invariants; `login` holds the
//! async flows that talk to the auth backend without borrowing the store
//! across an await.

pub mod login;
pub mod session;
