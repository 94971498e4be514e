pub mod client;
pub mod languages;
pub mod types;

pub use client::{ApiError, DeeplClient, TranslationProvider};
pub use languages::{LanguageCache, SharedLanguages};
pub use types::{
    Formality, Language, Languages, TranslateParams, TranslateResponse, Translation,
};
