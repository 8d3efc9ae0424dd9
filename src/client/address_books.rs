use crate::domain::{
    AddressBook, AddressBookId, ApiResult, BookEmail, EmailAddress, EmailEntry, HttpMethod,
    Pagination, ValidationError, Variables, non_empty, non_empty_list,
};
use crate::transport;

use super::{SendPulseClient, SendPulseError, decode_error, encode_error};

const ADDRESS_BOOKS: &str = "addressbooks";

fn book_path(id: AddressBookId) -> String {
    format!("{ADDRESS_BOOKS}/{id}")
}

fn emails_path(id: AddressBookId) -> String {
    format!("{ADDRESS_BOOKS}/{id}/emails")
}

impl SendPulseClient {
    /// List address books.
    pub async fn list_address_books(
        &self,
        pagination: Pagination,
    ) -> Result<Vec<AddressBook>, SendPulseError> {
        let payload = transport::encode_pagination(pagination).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Get, ADDRESS_BOOKS, Some(&payload), true)
            .await?;
        transport::decode_address_books(&body).map_err(decode_error)
    }

    /// Create an address book.
    ///
    /// The API only answers with the new id, so the returned name is the one requested.
    pub async fn create_address_book(&self, name: &str) -> Result<AddressBook, SendPulseError> {
        non_empty("bookName", name)?;
        let payload = transport::encode_create_book(name).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Post, ADDRESS_BOOKS, Some(&payload), true)
            .await?;
        let mut book = transport::decode_address_book(&body).map_err(decode_error)?;
        if book.name.is_empty() {
            book.name = name.to_owned();
        }
        Ok(book)
    }

    /// Rename an address book.
    pub async fn edit_address_book(
        &self,
        id: u64,
        name: &str,
    ) -> Result<ApiResult, SendPulseError> {
        let id = AddressBookId::new(id)?;
        non_empty("name", name)?;
        let payload = transport::encode_edit_book(name).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Put, &book_path(id), Some(&payload), true)
            .await?;
        transport::decode_api_result(&body).map_err(decode_error)
    }

    pub async fn remove_address_book(&self, id: u64) -> Result<ApiResult, SendPulseError> {
        let id = AddressBookId::new(id)?;
        let body = self
            .send(HttpMethod::Delete, &book_path(id), None, true)
            .await?;
        transport::decode_api_result(&body).map_err(decode_error)
    }

    pub async fn get_address_book(&self, id: u64) -> Result<AddressBook, SendPulseError> {
        let id = AddressBookId::new(id)?;
        let body = self.send(HttpMethod::Get, &book_path(id), None, true).await?;
        transport::decode_address_book(&body).map_err(decode_error)
    }

    /// List the emails stored in an address book.
    pub async fn get_emails_from_book(&self, id: u64) -> Result<Vec<BookEmail>, SendPulseError> {
        let id = AddressBookId::new(id)?;
        let body = self
            .send(HttpMethod::Get, &emails_path(id), None, true)
            .await?;
        transport::decode_book_emails(&body).map_err(decode_error)
    }

    /// Add emails (with their variables) to an address book.
    pub async fn add_emails(
        &self,
        book_id: u64,
        entries: &[EmailEntry],
    ) -> Result<ApiResult, SendPulseError> {
        let book_id = AddressBookId::new(book_id)?;
        non_empty_list("emails", entries)?;
        let payload = transport::encode_add_emails(entries).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Post, &emails_path(book_id), Some(&payload), true)
            .await?;
        transport::decode_api_result(&body).map_err(decode_error)
    }

    pub async fn remove_emails<S: AsRef<str>>(
        &self,
        book_id: u64,
        emails: &[S],
    ) -> Result<ApiResult, SendPulseError> {
        let book_id = AddressBookId::new(book_id)?;
        non_empty_list("emails", emails)?;
        let emails = emails
            .iter()
            .map(|email| EmailAddress::new(email.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let payload = transport::encode_remove_emails(&emails).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Delete, &emails_path(book_id), Some(&payload), true)
            .await?;
        transport::decode_api_result(&body).map_err(decode_error)
    }

    pub async fn get_email_info(
        &self,
        book_id: u64,
        email: &str,
    ) -> Result<BookEmail, SendPulseError> {
        let book_id = AddressBookId::new(book_id)?;
        let email = EmailAddress::new(email)?;
        let book_id = book_id.to_string();
        let path = self.segment_path(&[ADDRESS_BOOKS, &book_id, "emails", email.as_str()]);
        let body = self.send(HttpMethod::Get, &path, None, true).await?;
        transport::decode_book_email(&body).map_err(decode_error)
    }

    /// Replace the variables of one email in an address book.
    pub async fn update_email_variables(
        &self,
        book_id: u64,
        email: &str,
        variables: &Variables,
    ) -> Result<ApiResult, SendPulseError> {
        let book_id = AddressBookId::new(book_id)?;
        let email = EmailAddress::new(email)?;
        if variables.is_empty() {
            return Err(ValidationError::Empty { field: "variables" }.into());
        }
        let payload =
            transport::encode_email_variables(&email, variables).map_err(encode_error)?;
        let path = format!("{}/variable", emails_path(book_id));
        let body = self
            .send(HttpMethod::Post, &path, Some(&payload), true)
            .await?;
        transport::decode_api_result(&body).map_err(decode_error)
    }
}
