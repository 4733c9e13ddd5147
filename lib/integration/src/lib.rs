//! Account service integration for the lodestar onboarding page.
//!
//! This crate provides:
//!
//! - **AccountsApi trait**: The remote operations the page depends on
//! - **HTTP client**: reqwest implementation with bearer forwarding
//! - **Onboarding service**: Save outcomes and domain lookups on top of the API

pub mod api;
pub mod client;
pub mod error;
pub mod service;

pub use api::AccountsApi;
pub use client::{AccountsApiConfig, HttpAccountsApi};
pub use error::ApiError;
pub use service::OnboardingService;
