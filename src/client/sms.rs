use crate::domain::{
    AddressBookId, ApiResult, HttpMethod, NewSmsCampaign, PhoneEntry, PhoneNumber, SmsCampaign,
    SmsMessage, non_empty_list,
};
use crate::transport;

use super::{SendPulseClient, SendPulseError, decode_error, encode_error};

impl SendPulseClient {
    /// Add phone numbers to an address book.
    pub async fn sms_add_phones(
        &self,
        book_id: u64,
        phones: &[PhoneNumber],
    ) -> Result<ApiResult, SendPulseError> {
        let book_id = AddressBookId::new(book_id)?;
        non_empty_list(PhoneNumber::FIELD, phones)?;
        let payload = transport::encode_sms_phones(book_id, phones).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Post, "sms/numbers", Some(&payload), true)
            .await?;
        transport::decode_api_result(&body).map_err(decode_error)
    }

    /// Add phone numbers with template variables to an address book.
    pub async fn sms_add_phones_with_variables(
        &self,
        book_id: u64,
        entries: &[PhoneEntry],
    ) -> Result<ApiResult, SendPulseError> {
        let book_id = AddressBookId::new(book_id)?;
        non_empty_list(PhoneNumber::FIELD, entries)?;
        let payload =
            transport::encode_sms_phones_with_variables(book_id, entries).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Post, "sms/numbers/variables", Some(&payload), true)
            .await?;
        transport::decode_api_result(&body).map_err(decode_error)
    }

    /// Send an SMS to explicit phone numbers.
    pub async fn sms_send(&self, message: &SmsMessage) -> Result<ApiResult, SendPulseError> {
        let payload = transport::encode_sms_message(message).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Post, "sms/send", Some(&payload), true)
            .await?;
        transport::decode_api_result(&body).map_err(decode_error)
    }

    /// Create an SMS campaign for every phone in an address book.
    pub async fn sms_add_campaign(
        &self,
        campaign: &NewSmsCampaign,
    ) -> Result<SmsCampaign, SendPulseError> {
        let payload = transport::encode_sms_campaign(campaign).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Post, "sms/campaigns", Some(&payload), true)
            .await?;
        transport::decode_sms_campaign(&body).map_err(decode_error)
    }
}
