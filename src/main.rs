#[macro_use]
extern crate rocket;

extern crate openssl;
#[macro_use]
extern crate diesel;

#[macro_use]
extern crate diesel_migrations;

#[macro_use]
extern crate log;

embed_migrations!("migrations");

#[macro_use]
mod util;

mod analysis;
mod auth;
mod config;
mod email;
mod error;
mod models;
mod schema;
mod video;

use diesel::prelude::*;
use dotenv::dotenv;
use rocket::data::{Limits, ToByteUnit};
use rocket::http::Status;
use rocket::response::content::RawJson;
use rocket::response::status::Custom;
use rocket::Request;
use std::env;

use crate::auth::ratelimit::{MemoryRateLimiter, RateLimitStore};

#[catch(401)]
fn unauthorized() -> Custom<RawJson<String>> {
    make_json_response!(401, "Please authenticate.")
}

#[catch(default)]
fn fallback(status: Status, _request: &Request) -> Custom<RawJson<String>> {
    make_json_response!(status.code, status.reason_lossy())
}

#[rocket::main]
async fn main() {
    dotenv().ok();
    openssl_probe::init_ssl_cert_env_vars();

    let connection = create_connection().expect("Failed to connect to database");

    embedded_migrations::run(&connection).expect("Failed to run embedded migrations");

    std::mem::drop(connection);

    let figment = rocket::Config::figment()
        .merge(("port", config::service_port()))
        .merge((
            "limits",
            Limits::default()
                .limit("file", 500.mebibytes())
                .limit("data-form", 510.mebibytes()),
        ));

    match rocket::custom(figment)
        .manage(Box::new(MemoryRateLimiter::from_env()) as Box<dyn RateLimitStore>)
        .mount(
            "/api/auth",
            routes![
                auth::auth::register,
                auth::auth::verify_email,
                auth::auth::login,
                auth::auth::resend_verification,
            ],
        )
        .mount(
            "/api/videos",
            routes![
                video::public::upload_video,
                video::public::analyze_video,
                video::public::list_videos,
                video::public::get_video,
                video::public::get_prd,
                video::public::get_business_plan,
            ],
        )
        .register("/", catchers![unauthorized, fallback])
        .attach(crate::util::CORS)
        .launch()
        .await
    {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

pub fn create_connection() -> Option<PgConnection> {
    let database_url = unwrap_or_return!(env::var("DATABASE_URL"), "Database URL not set.");
    Some(unwrap_or_return!(
        PgConnection::establish(&database_url),
        "Error connecting to database!"
    ))
}
