//! Google Cloud credentials for the dubbing services
//!
//! Credentials are provisioned once at startup ([`provision`]) and turned
//! into a [`GoogleAuth`] that every service client shares. Requests are
//! authorized either with an API key header or with an OAuth2 access token
//! minted from a service-account key.

#![allow(clippy::missing_errors_doc)]

mod error;
mod google_auth;
mod http_client;
mod provision;
mod service_account;

pub use error::AuthError;
pub use google_auth::GoogleAuth;
pub use http_client::http_client;
pub use provision::{CredentialSource, Credentials, provision};
pub use service_account::ServiceAccountKey;
