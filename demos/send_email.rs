use std::io;

use sendpulse::{Credentials, Recipient, SendPulseClient, SmtpEmail};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let from_email = required("SENDPULSE_FROM_EMAIL")?;
    let from_name = std::env::var("SENDPULSE_FROM_NAME").unwrap_or_else(|_| "SendPulse demo".to_owned());
    let to = required("SENDPULSE_TO")?;
    let subject = std::env::var("SENDPULSE_SUBJECT")
        .unwrap_or_else(|_| "Hello from the sendpulse demo".to_owned());

    let client = SendPulseClient::connect(Credentials::from_env()?, "tokens").await?;
    let email = SmtpEmail::new(
        subject,
        Recipient::named(from_name, from_email)?,
        vec![Recipient::new(to)?],
    )?
    .html("<p>This message was sent by the <b>send_email</b> demo.</p>")
    .text("This message was sent by the send_email demo.");

    let result = client.smtp_send_mail(&email).await?;
    println!("result: {}, id: {:?}", result.result, result.id);
    Ok(())
}
