//! egui rendering. Every function here reads from or mutates [`crate::state::AppState`];
//! none of them compute aggregates themselves.

pub mod format;
pub mod panels;
pub mod plot;
pub mod table;
