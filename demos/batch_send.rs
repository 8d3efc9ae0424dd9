use std::io;
use std::time::Duration;

use sendpulse::{Credentials, Recipient, SendPulseClient, SmtpEmail};

const PLACEHOLDER: &str = "{{salutation}}";
const DEFAULT_COOLDOWN_MINUTES: u64 = 70;

#[derive(Debug)]
struct Row {
    line: usize,
    salutation: String,
    email: String,
}

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn cooldown_from_minutes(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

/// Split `salutation;email` lines into batches separated by blank lines.
fn parse_batches(input: &str) -> Vec<Vec<Row>> {
    let mut batches = Vec::new();
    let mut current = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                batches.push(std::mem::take(&mut current));
            }
            continue;
        }
        match line.split_once(';') {
            Some((salutation, email)) if !email.trim().is_empty() => current.push(Row {
                line: line_number,
                salutation: salutation.trim().to_owned(),
                email: email.trim().to_owned(),
            }),
            _ => tracing::warn!(line = line_number, "skipping malformed row"),
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

async fn send_row(
    client: &SendPulseClient,
    from: &Recipient,
    subject: &str,
    template: &str,
    row: &Row,
) -> Result<(), sendpulse::SendPulseError> {
    let email = SmtpEmail::new(subject, from.clone(), vec![Recipient::new(&row.email)?])?
        .html(template.replace(PLACEHOLDER, &row.salutation));
    let result = client.smtp_send_mail(&email).await?;
    tracing::info!(line = row.line, email = %row.email, accepted = result.result, "sent");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let template = std::fs::read_to_string(required("SENDPULSE_TEMPLATE")?)?;
    let recipients = std::fs::read_to_string(required("SENDPULSE_RECIPIENTS")?)?;
    let subject = required("SENDPULSE_SUBJECT")?;
    let from_email = required("SENDPULSE_FROM_EMAIL")?;
    let from = match std::env::var("SENDPULSE_FROM_NAME") {
        Ok(name) if !name.trim().is_empty() => Recipient::named(name, from_email)?,
        _ => Recipient::new(from_email)?,
    };
    let cooldown_minutes = match std::env::var("SENDPULSE_COOLDOWN_MINUTES") {
        Ok(value) => value.parse::<u64>()?,
        Err(_) => DEFAULT_COOLDOWN_MINUTES,
    };
    let cooldown = cooldown_from_minutes(cooldown_minutes);

    let client = SendPulseClient::connect(Credentials::from_env()?, "tokens").await?;
    let batches = parse_batches(&recipients);
    let total = batches.len();

    for (index, batch) in batches.iter().enumerate() {
        tracing::info!(batch = index + 1, total, rows = batch.len(), "sending batch");
        for row in batch {
            if let Err(err) = send_row(&client, &from, &subject, &template, row).await {
                tracing::error!(line = row.line, email = %row.email, error = %err, "failed");
            }
        }

        if index + 1 < total {
            tracing::info!(minutes = cooldown_minutes, "waiting before next batch");
            tokio::select! {
                _ = tokio::time::sleep(cooldown) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::warn!("interrupted, remaining batches were not sent");
                    return Ok(());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_separate_batches_and_bad_rows_are_skipped() {
        let input = "Dear Ann;ann@example.com\nHi Bob;bob@example.com\n\n\nno separator\nHello;carl@example.com\n";
        let batches = parse_batches(input);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[0][1].salutation, "Hi Bob");
        assert_eq!(batches[1].len(), 1);
        assert_eq!(batches[1][0].email, "carl@example.com");
        assert_eq!(batches[1][0].line, 6);
    }

    #[test]
    fn huge_cooldown_saturates_instead_of_overflowing() {
        assert_eq!(cooldown_from_minutes(70), Duration::from_secs(4200));
        assert_eq!(cooldown_from_minutes(u64::MAX), Duration::from_secs(u64::MAX));
    }
}
