#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Machine translation client for the dubbing pipeline

mod error;
mod provider;
mod types;

pub use error::{Result, TranslateError};
pub use provider::{TranslateProvider, google::GoogleTranslateProvider};
pub use types::{TranslationRequest, TranslationResponse};
