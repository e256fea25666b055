//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render portal chrome while reading shared state (session, icon
//! registry) from Leptos context providers.

pub mod icons;
pub mod notification_bell;
pub mod portal_layout;
