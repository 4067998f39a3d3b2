//! Persistence contracts for the single preference slot owned by the presentation context.

pub mod prefs;
