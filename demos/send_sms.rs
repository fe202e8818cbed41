use std::io;

use emosms::{Credentials, EmoClient, MessageText, Recipient, SendOptions, SendSms};

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
    let phone = std::env::var("EMO_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EMO_PHONE environment variable is required (international format)",
        )
    })?;
    let message =
        std::env::var("EMO_MESSAGE").unwrap_or_else(|_| "Hello from the emosms demo.".to_owned());

    let client = EmoClient::new(Credentials::new(user, password)?);
    let to = Recipient::new(phone)?;
    let text = MessageText::new(message)?;
    let request = SendSms::new(vec![to], text, SendOptions::default())?;

    let receipt = client.send_sms(&request).await?;
    println!(
        "message accepted: id {}, units consumed {}",
        receipt.message_id, receipt.units
    );

    Ok(())
}
