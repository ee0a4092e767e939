//! Configuration module for Tingli.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    AdminSettings, DictionarySettings, GeneralSettings, QuizSettings, Settings, StoreProvider,
    StoreSettings,
};
