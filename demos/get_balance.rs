use sendpulse::{Credentials, SendPulseClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let token_dir = std::env::var("SENDPULSE_TOKEN_DIR").unwrap_or_else(|_| "tokens".to_owned());
    let currency = std::env::var("SENDPULSE_CURRENCY").ok();

    let client = SendPulseClient::connect(Credentials::from_env()?, token_dir).await?;
    let balance = client.get_balance(currency.as_deref()).await?;

    println!(
        "balance: {} {}",
        balance.amount().unwrap_or("?"),
        balance.currency().unwrap_or("")
    );
    Ok(())
}
