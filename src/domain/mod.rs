//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub(crate) use validation::{non_empty, non_empty_list};

pub use request::{
    EmailEntry, NewCampaign, NewSmsCampaign, Pagination, PhoneEntry, Recipient, SmsMessage,
    SmtpEmail, SmtpListQuery, Variables,
};
pub use response::{
    AddressBook, ApiResult, Balance, BookEmail, Campaign, SentEmail, SmsCampaign,
};
pub use validation::ValidationError;
pub use value::{
    AccessToken, AddressBookId, CampaignId, ClientId, ClientSecret, Credentials, EmailAddress,
    HttpMethod, PhoneNumber,
};
