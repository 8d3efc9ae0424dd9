use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::domain::validation::{ValidationError, non_empty, non_empty_list};
use crate::domain::value::{AddressBookId, EmailAddress, PhoneNumber};

/// Free-form template variables or extension fields attached to a payload.
pub type Variables = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// `limit`/`offset` for list endpoints. Unset values are not sent.
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// An email address with its per-recipient template variables.
pub struct EmailEntry {
    pub email: EmailAddress,
    pub variables: Variables,
}

impl EmailEntry {
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            variables: Variables::new(),
        })
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A phone number with its per-recipient template variables.
pub struct PhoneEntry {
    pub phone: PhoneNumber,
    pub variables: Variables,
}

impl PhoneEntry {
    pub fn new(phone: PhoneNumber) -> Self {
        Self {
            phone,
            variables: Variables::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Email campaign sent to one address book.
///
/// `body` is HTML and is base64-encoded on the wire.
pub struct NewCampaign {
    sender_name: String,
    sender_email: EmailAddress,
    subject: String,
    body: String,
    list_id: AddressBookId,
    name: Option<String>,
    attachments: Vec<String>,
}

impl NewCampaign {
    pub fn new(
        sender_name: impl Into<String>,
        sender_email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        list_id: u64,
    ) -> Result<Self, ValidationError> {
        let sender_name = sender_name.into();
        let subject = subject.into();
        let body = body.into();
        non_empty("sender_name", &sender_name)?;
        non_empty("subject", &subject)?;
        non_empty("body", &body)?;
        Ok(Self {
            sender_name,
            sender_email: EmailAddress::new(sender_email)?,
            subject,
            body,
            list_id: AddressBookId::new(list_id)?,
            name: None,
            attachments: Vec::new(),
        })
    }

    /// Internal campaign name shown in the dashboard.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachments.push(attachment.into());
        self
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn sender_email(&self) -> &EmailAddress {
        &self.sender_email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn list_id(&self) -> AddressBookId {
        self.list_id
    }

    pub fn campaign_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Sender or recipient of an SMTP email.
pub struct Recipient {
    pub name: Option<String>,
    pub email: EmailAddress,
}

impl Recipient {
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: None,
            email: EmailAddress::new(email)?,
        })
    }

    pub fn named(name: impl Into<String>, email: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Some(name.into()),
            email: EmailAddress::new(email)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Transactional email for `smtp/emails`.
///
/// Fields the API accepts but this type does not model (`bcc`, `template`,
/// `attachments_binary`, ...) go into [`SmtpEmail::extra`].
pub struct SmtpEmail {
    subject: String,
    from: Recipient,
    to: Vec<Recipient>,
    html: Option<String>,
    text: Option<String>,
    extra: Variables,
}

impl SmtpEmail {
    pub fn new(
        subject: impl Into<String>,
        from: Recipient,
        to: Vec<Recipient>,
    ) -> Result<Self, ValidationError> {
        let subject = subject.into();
        non_empty("subject", &subject)?;
        non_empty_list("to", &to)?;
        Ok(Self {
            subject,
            from,
            to,
            html: None,
            text: None,
            extra: Variables::new(),
        })
    }

    /// HTML body; base64-encoded on the wire.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Extra top-level field. Modelled fields take precedence on conflicts.
    pub fn extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn from(&self) -> &Recipient {
        &self.from
    }

    pub fn to(&self) -> &[Recipient] {
        &self.to
    }

    pub fn html_body(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn text_body(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn extra_fields(&self) -> &Variables {
        &self.extra
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `smtp/emails` (GET). Unset values are not sent.
pub struct SmtpListQuery {
    pub pagination: Pagination,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// SMS sent directly to a list of phone numbers (`sms/send`).
pub struct SmsMessage {
    sender: String,
    phones: Vec<PhoneNumber>,
    body: String,
    date: Option<NaiveDateTime>,
    transliterate: bool,
    route: Option<String>,
    extra: Variables,
}

impl SmsMessage {
    pub fn new(
        sender: impl Into<String>,
        phones: Vec<PhoneNumber>,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let sender = sender.into();
        let body = body.into();
        non_empty("sender", &sender)?;
        non_empty_list(PhoneNumber::FIELD, &phones)?;
        non_empty("body", &body)?;
        Ok(Self {
            sender,
            phones,
            body,
            date: None,
            transliterate: false,
            route: None,
            extra: Variables::new(),
        })
    }

    /// Schedule delivery instead of sending immediately.
    pub fn schedule(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn transliterate(mut self, transliterate: bool) -> Self {
        self.transliterate = transliterate;
        self
    }

    /// Delivery route per country, passed through as-is.
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn phones(&self) -> &[PhoneNumber] {
        &self.phones
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }

    pub fn is_transliterated(&self) -> bool {
        self.transliterate
    }

    pub fn route_value(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn extra_fields(&self) -> &Variables {
        &self.extra
    }
}

#[derive(Debug, Clone, PartialEq)]
/// SMS campaign sent to every phone in an address book (`sms/campaigns`).
pub struct NewSmsCampaign {
    sender: String,
    address_book_id: AddressBookId,
    body: String,
    date: Option<NaiveDateTime>,
    transliterate: bool,
    extra: Variables,
}

impl NewSmsCampaign {
    pub fn new(
        sender: impl Into<String>,
        address_book_id: u64,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let sender = sender.into();
        let body = body.into();
        non_empty("sender", &sender)?;
        let address_book_id = AddressBookId::new(address_book_id)?;
        non_empty("body", &body)?;
        Ok(Self {
            sender,
            address_book_id,
            body,
            date: None,
            transliterate: false,
            extra: Variables::new(),
        })
    }

    pub fn schedule(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn transliterate(mut self, transliterate: bool) -> Self {
        self.transliterate = transliterate;
        self
    }

    pub fn extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn address_book_id(&self) -> AddressBookId {
        self.address_book_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }

    pub fn is_transliterated(&self) -> bool {
        self.transliterate
    }

    pub fn extra_fields(&self) -> &Variables {
        &self.extra
    }
}
