use rand::{distributions::Alphanumeric, Rng};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Request, Response};

/// Builds a `status::Custom<RawJson<String>>` carrying the usual
/// `{"status", "message", "data"}` envelope.
#[macro_export]
macro_rules! make_json_response {
    ($status:expr, $message:expr) => {
        rocket::response::status::Custom(
            rocket::http::Status::new($status),
            rocket::response::content::RawJson(
                serde_json::json!({
                    "status": $status,
                    "message": $message,
                })
                .to_string(),
            ),
        )
    };
    ($status:expr, $message:expr, $data:expr) => {
        rocket::response::status::Custom(
            rocket::http::Status::new($status),
            rocket::response::content::RawJson(
                serde_json::json!({
                    "status": $status,
                    "message": $message,
                    "data": $data,
                })
                .to_string(),
            ),
        )
    };
}

#[macro_export]
macro_rules! unwrap_or_return {
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                warn!("{} (error {})", $message, e);
                return None;
            }
        }
    };
}

pub fn make_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[cfg(test)]
mod tests {
    use super::make_random_string;

    #[test]
    fn random_strings_are_alphanumeric_and_sized() {
        let s = make_random_string(32);
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn random_strings_differ() {
        assert_ne!(make_random_string(32), make_random_string(32));
    }
}
