use crate::domain::{Balance, HttpMethod};
use crate::transport;

use super::{SendPulseClient, SendPulseError, decode_error};

impl SendPulseClient {
    /// Account balance, optionally in a specific currency (`usd`, `UAH`, ...).
    ///
    /// An empty currency is the same as `None`.
    pub async fn get_balance(&self, currency: Option<&str>) -> Result<Balance, SendPulseError> {
        let path = match currency.map(str::trim).filter(|code| !code.is_empty()) {
            Some(code) => self.segment_path(&["balance", &code.to_uppercase()]),
            None => "balance".to_owned(),
        };
        let body = self.send(HttpMethod::Get, &path, None, true).await?;
        transport::decode_balance(&body).map_err(decode_error)
    }
}
