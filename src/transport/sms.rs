use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::TransportError;
use super::result::decode_one;
use super::scalar::TransportScalar;
use crate::domain::{
    AddressBookId, NewSmsCampaign, PhoneEntry, PhoneNumber, SmsCampaign, SmsMessage, Variables,
};

/// Wire format for scheduled sends.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
struct PhonesJson {
    #[serde(rename = "addressBookId")]
    address_book_id: u64,
    phones: String,
}

#[derive(Debug, Serialize)]
struct PhoneEntryJson<'a> {
    phone: &'a str,
    #[serde(skip_serializing_if = "no_variables")]
    variables: &'a Variables,
}

fn no_variables(variables: &&Variables) -> bool {
    variables.is_empty()
}

#[derive(Debug, Deserialize)]
struct SmsCampaignJson {
    #[serde(alias = "campaign_id")]
    id: u64,
    #[serde(default)]
    sender: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    status: Option<TransportScalar>,
}

fn phone_values(phones: &[PhoneNumber]) -> Vec<&str> {
    phones.iter().map(PhoneNumber::as_str).collect()
}

/// Start from the extension map so modelled fields win on conflicts.
fn with_extra(extra: &Variables) -> Map<String, Value> {
    extra
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

pub fn encode_sms_phones(
    address_book_id: AddressBookId,
    phones: &[PhoneNumber],
) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(PhonesJson {
        address_book_id: address_book_id.value(),
        phones: serde_json::to_string(&phone_values(phones))?,
    })?)
}

pub fn encode_sms_phones_with_variables(
    address_book_id: AddressBookId,
    entries: &[PhoneEntry],
) -> Result<Value, TransportError> {
    let entries = entries
        .iter()
        .map(|entry| PhoneEntryJson {
            phone: entry.phone.as_str(),
            variables: &entry.variables,
        })
        .collect::<Vec<_>>();
    Ok(serde_json::to_value(PhonesJson {
        address_book_id: address_book_id.value(),
        phones: serde_json::to_string(&entries)?,
    })?)
}

pub fn encode_sms_message(message: &SmsMessage) -> Result<Value, TransportError> {
    let mut payload = with_extra(message.extra_fields());
    payload.insert("sender".to_owned(), Value::from(message.sender()));
    payload.insert(
        "phones".to_owned(),
        Value::from(serde_json::to_string(&phone_values(message.phones()))?),
    );
    payload.insert("body".to_owned(), Value::from(message.body()));
    payload.insert(
        "transliterate".to_owned(),
        Value::from(message.is_transliterated()),
    );
    if let Some(route) = message.route_value() {
        payload.insert("route".to_owned(), Value::from(route));
    }
    if let Some(date) = message.date() {
        payload.insert(
            "date".to_owned(),
            Value::from(date.format(DATE_FORMAT).to_string()),
        );
    }
    Ok(Value::Object(payload))
}

pub fn encode_sms_campaign(campaign: &NewSmsCampaign) -> Result<Value, TransportError> {
    let mut payload = with_extra(campaign.extra_fields());
    payload.insert("sender".to_owned(), Value::from(campaign.sender()));
    payload.insert(
        AddressBookId::FIELD.to_owned(),
        Value::from(campaign.address_book_id().value()),
    );
    payload.insert("body".to_owned(), Value::from(campaign.body()));
    payload.insert(
        "transliterate".to_owned(),
        Value::from(campaign.is_transliterated()),
    );
    if let Some(date) = campaign.date() {
        payload.insert(
            "date".to_owned(),
            Value::from(date.format(DATE_FORMAT).to_string()),
        );
    }
    Ok(Value::Object(payload))
}

pub fn decode_sms_campaign(json: &str) -> Result<SmsCampaign, TransportError> {
    let parsed: SmsCampaignJson = decode_one(json, "id")?;
    Ok(SmsCampaign {
        id: parsed.id,
        sender: parsed.sender,
        body: parsed.body,
        status: parsed.status.map(TransportScalar::into_string),
    })
}
