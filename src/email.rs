use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("SMTP is not configured")]
    NotConfigured,
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("failed to send message: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Best effort: a failed send surfaces to the caller and is not retried.
pub async fn send_verification_email(to: &str, code: &str) -> Result<(), EmailError> {
    let host = config::smtp_host().ok_or(EmailError::NotConfigured)?;
    let user = config::smtp_user().ok_or(EmailError::NotConfigured)?;
    let pass = config::smtp_pass().ok_or(EmailError::NotConfigured)?;

    let minutes = config::verification_code_expiry() / 60;
    let message = Message::builder()
        .from(user.parse::<Mailbox>()?)
        .to(to.parse::<Mailbox>()?)
        .subject("Email verification code")
        .multipart(MultiPart::alternative_plain_html(
            format!(
                "Your verification code is: {}\nThe code is valid for {} minutes.",
                code, minutes
            ),
            format!(
                "<div style=\"font-family: Arial, sans-serif; padding: 20px;\">\
                 <h2>Email verification</h2>\
                 <p>Your verification code is: <strong>{}</strong></p>\
                 <p>The code is valid for {} minutes.</p>\
                 </div>",
                code, minutes
            ),
        ))?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)?
        .port(config::smtp_port())
        .credentials(Credentials::new(user, pass))
        .build();

    mailer.send(message).await?;
    info!("Sent verification email to {}", to);
    Ok(())
}
