use std::collections::BTreeMap;

use crate::domain::request::Variables;
use crate::domain::value::EmailAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBook {
    pub id: u64,
    pub name: String,
    pub all_email_qty: Option<u64>,
    pub active_email_qty: Option<u64>,
    pub inactive_email_qty: Option<u64>,
    pub creation_date: Option<String>,
    pub status: Option<String>,
    pub status_explain: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// An email stored in an address book.
pub struct BookEmail {
    pub email: EmailAddress,
    pub status: Option<String>,
    pub variables: Variables,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: u64,
    pub name: Option<String>,
    pub status: Option<String>,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsCampaign {
    pub id: u64,
    pub sender: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Generic acknowledgement returned by mutating endpoints (`{"result": true, ...}`).
pub struct ApiResult {
    pub result: bool,
    pub id: Option<u64>,
    /// Any other top-level fields, preserved verbatim.
    pub extra: Variables,
}

#[derive(Debug, Clone, PartialEq)]
/// An email listed by `smtp/emails`.
pub struct SentEmail {
    pub id: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub subject: Option<String>,
    pub send_date: Option<String>,
    pub smtp_answer_code: Option<String>,
    pub extra: Variables,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Account balance.
///
/// Every scalar field of the response is kept as a string; numbers keep their raw JSON
/// token (`10.00` stays `"10.00"`). Nested values such as the per-channel `email` and
/// `sms` breakdowns are kept in `extra`.
pub struct Balance {
    pub fields: BTreeMap<String, String>,
    pub extra: Variables,
}

impl Balance {
    pub fn currency(&self) -> Option<&str> {
        self.fields.get("currency").map(String::as_str)
    }

    /// Balance in [`Balance::currency`].
    pub fn amount(&self) -> Option<&str> {
        self.fields.get("balance_currency").map(String::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}
