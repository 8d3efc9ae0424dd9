use crate::domain::{ApiResult, Campaign, CampaignId, HttpMethod, NewCampaign, Pagination};
use crate::transport;

use super::{SendPulseClient, SendPulseError, decode_error, encode_error};

const CAMPAIGNS: &str = "campaigns";

impl SendPulseClient {
    pub async fn list_campaigns(
        &self,
        pagination: Pagination,
    ) -> Result<Vec<Campaign>, SendPulseError> {
        let payload = transport::encode_pagination(pagination).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Get, CAMPAIGNS, Some(&payload), true)
            .await?;
        transport::decode_campaigns(&body).map_err(decode_error)
    }

    pub async fn get_campaign(&self, id: u64) -> Result<Campaign, SendPulseError> {
        let id = CampaignId::new(id)?;
        let body = self
            .send(HttpMethod::Get, &format!("{CAMPAIGNS}/{id}"), None, true)
            .await?;
        transport::decode_campaign(&body).map_err(decode_error)
    }

    /// Create and schedule an email campaign for an address book.
    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, SendPulseError> {
        let payload = transport::encode_new_campaign(campaign).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Post, CAMPAIGNS, Some(&payload), true)
            .await?;
        transport::decode_campaign(&body).map_err(decode_error)
    }

    /// Cancel a campaign that has not been sent yet.
    pub async fn cancel_campaign(&self, id: u64) -> Result<ApiResult, SendPulseError> {
        let id = CampaignId::new(id)?;
        let body = self
            .send(HttpMethod::Delete, &format!("{CAMPAIGNS}/{id}"), None, true)
            .await?;
        transport::decode_api_result(&body).map_err(decode_error)
    }
}
