use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

fn parse_or<T: FromStr>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid {} value: {}", key, e);
                default
            }
        },
        Err(_) => default,
    }
}

pub fn service_port() -> u16 {
    parse_or("PORT", 8000)
}

pub fn upload_dir() -> String {
    env::var("UPLOAD_DIR").unwrap_or_else(|_| String::from("uploads"))
}

pub fn jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| String::from("default_secret"))
}

/// Verification code lifetime, seconds.
pub fn verification_code_expiry() -> i64 {
    parse_or("VERIFICATION_CODE_EXPIRY", 600)
}

/// Resend rate limit window. The variable is in milliseconds.
pub fn rate_limit_window() -> Duration {
    Duration::from_millis(parse_or("RATE_LIMIT_WINDOW", 900_000))
}

pub fn rate_limit_max_requests() -> u32 {
    parse_or("RATE_LIMIT_MAX_REQUESTS", 3)
}

pub fn gemini_api_key() -> Option<String> {
    env::var("GEMINI_API_KEY").ok()
}

pub fn smtp_host() -> Option<String> {
    env::var("SMTP_HOST").ok()
}

pub fn smtp_port() -> u16 {
    parse_or("SMTP_PORT", 465)
}

pub fn smtp_user() -> Option<String> {
    env::var("SMTP_USER").ok()
}

pub fn smtp_pass() -> Option<String> {
    env::var("SMTP_PASS").ok()
}
