//! Typed Rust client for the SendPulse REST API.
//!
//! The crate is split into a domain layer of validated types, a transport layer for
//! wire-format quirks, a token store, and a small client layer that owns the token
//! lifecycle: the bearer token is cached on disk per credential pair, reused across
//! runs, and refreshed transparently when the API answers `401`.
//!
//! ```rust,no_run
//! use sendpulse::{Credentials, Recipient, SendPulseClient, SmtpEmail};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sendpulse::SendPulseError> {
//!     let client = SendPulseClient::connect(Credentials::from_env()?, "tokens").await?;
//!     let email = SmtpEmail::new(
//!         "Hello",
//!         Recipient::named("Shop", "shop@example.com")?,
//!         vec![Recipient::new("user@example.com")?],
//!     )?
//!     .html("<p>Hello!</p>");
//!     client.smtp_send_mail(&email).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod store;
mod transport;

pub use client::{AuthError, SendPulseClient, SendPulseClientBuilder, SendPulseError};
pub use domain::{
    AccessToken, AddressBook, AddressBookId, ApiResult, Balance, BookEmail, Campaign, CampaignId,
    ClientId, ClientSecret, Credentials, EmailAddress, EmailEntry, HttpMethod, NewCampaign,
    NewSmsCampaign, Pagination, PhoneEntry, PhoneNumber, Recipient, SentEmail, SmsCampaign,
    SmsMessage, SmtpEmail, SmtpListQuery, ValidationError, Variables,
};
pub use store::{FileTokenStore, TokenStore, credentials_fingerprint};
