// Quick Define shared type definitions
// Each submodule defines types used across the background service and its surfaces.

pub mod dictionary;
pub mod errors;
pub mod history;
pub mod menu;
pub mod message;
pub mod settings;
pub mod tab;
