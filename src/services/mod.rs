// Quick Define services
// Services provide storage, the settings record and URL building.

pub mod settings_store;
pub mod storage;
pub mod url_builder;
