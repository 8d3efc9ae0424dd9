use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// OAuth client identifier (`client_id`).
///
/// Invariant: non-empty after trimming.
pub struct ClientId(String);

impl ClientId {
    /// JSON field name used by the token endpoint (`client_id`).
    pub const FIELD: &'static str = "client_id";

    /// Environment variable read by [`Credentials::from_env`].
    pub const ENV: &'static str = "SENDPULSE_CLIENT_ID";

    /// Create a validated [`ClientId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// OAuth client secret (`client_secret`).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The `Debug` output never contains the secret.
pub struct ClientSecret(String);

impl ClientSecret {
    /// JSON field name used by the token endpoint (`client_secret`).
    pub const FIELD: &'static str = "client_secret";

    /// Environment variable read by [`Credentials::from_env`].
    pub const ENV: &'static str = "SENDPULSE_CLIENT_SECRET";

    /// Create a validated [`ClientSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(..)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Client credentials exchanged for a bearer token.
pub struct Credentials {
    client_id: ClientId,
    client_secret: ClientSecret,
}

impl Credentials {
    /// Validate both parts and build a credential pair.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            client_id: ClientId::new(client_id)?,
            client_secret: ClientSecret::new(client_secret)?,
        })
    }

    /// Read `SENDPULSE_CLIENT_ID` and `SENDPULSE_CLIENT_SECRET` from the environment.
    pub fn from_env() -> Result<Self, ValidationError> {
        let client_id = std::env::var(ClientId::ENV)
            .map_err(|_| ValidationError::MissingEnvVar { name: ClientId::ENV })?;
        let client_secret = std::env::var(ClientSecret::ENV).map_err(|_| {
            ValidationError::MissingEnvVar {
                name: ClientSecret::ENV,
            }
        })?;
        Self::new(client_id, client_secret)
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Opaque bearer token returned by `oauth/access_token`.
///
/// Invariant: non-empty. The format is never inspected.
pub struct AccessToken(String);

impl AccessToken {
    /// JSON field name in the token response (`access_token`).
    pub const FIELD: &'static str = "access_token";

    /// Create a token from its raw value.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Address book (mailing list) id.
///
/// Invariant: non-zero.
pub struct AddressBookId(u64);

impl AddressBookId {
    /// Field name used in error messages and SMS payloads (`addressBookId`).
    pub const FIELD: &'static str = "addressBookId";

    /// Create a validated [`AddressBookId`].
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::Zero { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AddressBookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Email campaign id.
///
/// Invariant: non-zero.
pub struct CampaignId(u64);

impl CampaignId {
    pub const FIELD: &'static str = "campaign_id";

    /// Create a validated [`CampaignId`].
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::Zero { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Email address as accepted by the API.
///
/// Invariant: non-empty after trimming. No syntax check is performed; the API decides.
pub struct EmailAddress(String);

impl EmailAddress {
    pub const FIELD: &'static str = "email";

    /// Create a validated (non-empty) email address.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number exactly as it is sent to the API.
///
/// Invariant: non-empty after trimming. The format is left to the API; use
/// [`PhoneNumber::normalized`] to turn local or `+`-prefixed input into digits.
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const FIELD: &'static str = "phones";

    /// Accept any non-empty value; it is sent trimmed but otherwise unchanged.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parse `input` and keep its E.164 digits without the leading `+`.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn normalized(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, raw).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            }
        })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self(e164.trim_start_matches('+').to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// HTTP methods accepted by [`crate::SendPulseClient::send_raw_request`].
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ValidationError;

    /// Only exact upper-case names from the allow-list are accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            other => {
                return Err(ValidationError::MethodNotAllowed {
                    method: other.to_owned(),
                });
            }
        })
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
