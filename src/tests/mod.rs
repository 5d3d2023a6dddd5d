//! End-to-end scenarios across session, navigator and cleanup.

mod cleanup_scenarios;
mod fill_scenarios;
