use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TransportError;
use super::result::decode_one;
use super::scalar::TransportScalar;
use crate::domain::{Campaign, NewCampaign};

#[derive(Debug, Serialize)]
struct NewCampaignJson<'a> {
    sender_name: &'a str,
    sender_email: &'a str,
    subject: &'a str,
    body: String,
    list_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CampaignJson {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: Option<TransportScalar>,
    #[serde(default)]
    sender_name: Option<String>,
    #[serde(default)]
    sender_email: Option<String>,
    #[serde(default)]
    subject: Option<String>,
}

impl From<CampaignJson> for Campaign {
    fn from(value: CampaignJson) -> Self {
        Self {
            id: value.id,
            name: value.name,
            status: value.status.map(TransportScalar::into_string),
            sender_name: value.sender_name,
            sender_email: value.sender_email,
            subject: value.subject,
        }
    }
}

/// The HTML body is base64-encoded; attachments are embedded as a JSON string.
pub fn encode_new_campaign(campaign: &NewCampaign) -> Result<Value, TransportError> {
    let attachments = if campaign.attachments().is_empty() {
        None
    } else {
        Some(serde_json::to_string(campaign.attachments())?)
    };
    Ok(serde_json::to_value(NewCampaignJson {
        sender_name: campaign.sender_name(),
        sender_email: campaign.sender_email().as_str(),
        subject: campaign.subject(),
        body: STANDARD.encode(campaign.body()),
        list_id: campaign.list_id().value(),
        name: campaign.campaign_name(),
        attachments,
    })?)
}

pub fn decode_campaigns(json: &str) -> Result<Vec<Campaign>, TransportError> {
    let parsed: Vec<CampaignJson> = serde_json::from_str(json)?;
    Ok(parsed.into_iter().map(Campaign::from).collect())
}

pub fn decode_campaign(json: &str) -> Result<Campaign, TransportError> {
    let parsed: CampaignJson = decode_one(json, "id")?;
    Ok(parsed.into())
}
