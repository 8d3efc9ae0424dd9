//! Transport layer: wire-format details (serialization/deserialization).

mod address_books;
mod balance;
mod campaigns;
mod error;
mod result;
mod scalar;
mod sms;
mod smtp;
mod token;

pub use address_books::{
    decode_address_book, decode_address_books, decode_book_email, decode_book_emails,
    encode_add_emails, encode_create_book, encode_edit_book, encode_email_variables,
    encode_pagination, encode_remove_emails,
};
pub use balance::decode_balance;
pub use campaigns::{decode_campaign, decode_campaigns, encode_new_campaign};
pub use error::TransportError;
pub use result::decode_api_result;
pub use sms::{
    decode_sms_campaign, encode_sms_campaign, encode_sms_message, encode_sms_phones,
    encode_sms_phones_with_variables,
};
pub use smtp::{decode_sent_emails, encode_smtp_email, encode_smtp_list_query};
pub use token::{decode_error_body, decode_token_response, encode_token_request, is_invalid_client};
