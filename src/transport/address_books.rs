use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TransportError;
use super::result::{decode_one, object_or_empty};
use super::scalar::TransportScalar;
use crate::domain::{AddressBook, BookEmail, EmailAddress, EmailEntry, Pagination, Variables};

#[derive(Debug, Serialize)]
struct PaginationJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
}

#[derive(Debug, Serialize)]
struct CreateBookJson<'a> {
    #[serde(rename = "bookName")]
    book_name: &'a str,
}

#[derive(Debug, Serialize)]
struct EditBookJson<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct EmailsJson {
    emails: String,
}

#[derive(Debug, Serialize)]
struct EmailEntryJson<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "no_variables")]
    variables: &'a Variables,
}

fn no_variables(variables: &&Variables) -> bool {
    variables.is_empty()
}

#[derive(Debug, Serialize)]
struct EmailVariablesJson<'a> {
    email: &'a str,
    variables: &'a Variables,
}

#[derive(Debug, Deserialize)]
struct AddressBookJson {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    all_email_qty: Option<u64>,
    #[serde(default)]
    active_email_qty: Option<u64>,
    #[serde(default)]
    inactive_email_qty: Option<u64>,
    #[serde(default, rename = "creationdate")]
    creation_date: Option<String>,
    #[serde(default)]
    status: Option<TransportScalar>,
    #[serde(default)]
    status_explain: Option<String>,
}

impl From<AddressBookJson> for AddressBook {
    fn from(value: AddressBookJson) -> Self {
        Self {
            id: value.id,
            name: value.name,
            all_email_qty: value.all_email_qty,
            active_email_qty: value.active_email_qty,
            inactive_email_qty: value.inactive_email_qty,
            creation_date: value.creation_date,
            status: value.status.map(TransportScalar::into_string),
            status_explain: value.status_explain,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BookEmailJson {
    email: String,
    #[serde(default)]
    status: Option<TransportScalar>,
    #[serde(default)]
    variables: Option<Value>,
}

impl TryFrom<BookEmailJson> for BookEmail {
    type Error = TransportError;

    fn try_from(value: BookEmailJson) -> Result<Self, Self::Error> {
        Ok(Self {
            email: EmailAddress::new(value.email)?,
            status: value.status.map(TransportScalar::into_string),
            variables: object_or_empty(value.variables),
        })
    }
}

pub fn encode_pagination(pagination: Pagination) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(PaginationJson {
        limit: pagination.limit,
        offset: pagination.offset,
    })?)
}

pub fn encode_create_book(name: &str) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(CreateBookJson { book_name: name })?)
}

pub fn encode_edit_book(name: &str) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(EditBookJson { name })?)
}

/// `emails` is itself a JSON document embedded as a string.
pub fn encode_add_emails(entries: &[EmailEntry]) -> Result<Value, TransportError> {
    let entries = entries
        .iter()
        .map(|entry| EmailEntryJson {
            email: entry.email.as_str(),
            variables: &entry.variables,
        })
        .collect::<Vec<_>>();
    Ok(serde_json::to_value(EmailsJson {
        emails: serde_json::to_string(&entries)?,
    })?)
}

pub fn encode_remove_emails(emails: &[EmailAddress]) -> Result<Value, TransportError> {
    let emails = emails.iter().map(EmailAddress::as_str).collect::<Vec<_>>();
    Ok(serde_json::to_value(EmailsJson {
        emails: serde_json::to_string(&emails)?,
    })?)
}

pub fn encode_email_variables(
    email: &EmailAddress,
    variables: &Variables,
) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(EmailVariablesJson {
        email: email.as_str(),
        variables,
    })?)
}

pub fn decode_address_books(json: &str) -> Result<Vec<AddressBook>, TransportError> {
    let parsed: Vec<AddressBookJson> = serde_json::from_str(json)?;
    Ok(parsed.into_iter().map(AddressBook::from).collect())
}

pub fn decode_address_book(json: &str) -> Result<AddressBook, TransportError> {
    let parsed: AddressBookJson = decode_one(json, "id")?;
    Ok(parsed.into())
}

pub fn decode_book_emails(json: &str) -> Result<Vec<BookEmail>, TransportError> {
    let parsed: Vec<BookEmailJson> = serde_json::from_str(json)?;
    parsed.into_iter().map(BookEmail::try_from).collect()
}

pub fn decode_book_email(json: &str) -> Result<BookEmail, TransportError> {
    let parsed: BookEmailJson = decode_one(json, "email")?;
    parsed.try_into()
}
