//! Browser-backed storage adapters.

pub mod local_prefs;
