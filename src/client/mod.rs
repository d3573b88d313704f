//! Kaggle API client and authentication.
//!
//! This module provides the [`KaggleClient`] for talking to the Kaggle dataset
//! API, along with the [`Credentials`] it authenticates with.

mod auth;
mod kaggle;

pub use auth::Credentials;
pub use kaggle::KaggleClient;
