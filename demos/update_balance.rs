use std::io;

use emosms::{Connector, Credentials, EmoClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let user = std::env::var("EMO_USER").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EMO_USER environment variable is required",
        )
    })?;
    let password = std::env::var("EMO_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EMO_PASSWORD environment variable is required",
        )
    })?;

    let client = EmoClient::new(Credentials::new(user, password)?);
    let mut connector = Connector::new(client);

    let balance = connector.update().await?;
    println!("remaining message units: {balance}");

    Ok(())
}
