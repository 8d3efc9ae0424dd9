use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::TransportError;
use super::scalar::scalar_from_value;
use crate::domain::{Recipient, SentEmail, SmtpEmail, SmtpListQuery};

#[derive(Debug, Serialize)]
struct RecipientJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

impl<'a> From<&'a Recipient> for RecipientJson<'a> {
    fn from(value: &'a Recipient) -> Self {
        Self {
            name: value.name.as_deref(),
            email: value.email.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailJson {
    email: String,
}

#[derive(Debug, Serialize)]
struct SmtpListJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient: Option<&'a str>,
}

/// The message is a JSON document embedded as a string under `email`; the HTML part
/// is base64-encoded. Extra fields are written first so modelled fields win.
pub fn encode_smtp_email(email: &SmtpEmail) -> Result<Value, TransportError> {
    let mut message = email
        .extra_fields()
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect::<Map<String, Value>>();

    message.insert("subject".to_owned(), Value::from(email.subject()));
    if let Some(html) = email.html_body() {
        message.insert("html".to_owned(), Value::from(STANDARD.encode(html)));
    }
    if let Some(text) = email.text_body() {
        message.insert("text".to_owned(), Value::from(text));
    }
    message.insert(
        "from".to_owned(),
        serde_json::to_value(RecipientJson::from(email.from()))?,
    );
    let to = email.to().iter().map(RecipientJson::from).collect::<Vec<_>>();
    message.insert("to".to_owned(), serde_json::to_value(to)?);

    Ok(serde_json::to_value(SendEmailJson {
        email: serde_json::to_string(&message)?,
    })?)
}

pub fn encode_smtp_list_query(query: &SmtpListQuery) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(SmtpListJson {
        limit: query.pagination.limit,
        offset: query.pagination.offset,
        from: query.from.as_deref(),
        to: query.to.as_deref(),
        sender: query.sender.as_deref(),
        recipient: query.recipient.as_deref(),
    })?)
}

pub fn decode_sent_emails(json: &str) -> Result<Vec<SentEmail>, TransportError> {
    let parsed: Vec<BTreeMap<String, Value>> = serde_json::from_str(json)?;
    Ok(parsed.into_iter().map(sent_email_from_fields).collect())
}

fn sent_email_from_fields(mut fields: BTreeMap<String, Value>) -> SentEmail {
    let mut take = |key: &str| {
        let value = fields.get(key).and_then(scalar_from_value)?;
        fields.remove(key);
        Some(value)
    };
    let id = take("id");
    let sender = take("sender");
    let recipient = take("recipient");
    let subject = take("subject");
    let send_date = take("send_date");
    let smtp_answer_code = take("smtp_answer_code");
    SentEmail {
        id,
        sender,
        recipient,
        subject,
        send_date,
        smtp_answer_code,
        extra: fields,
    }
}
