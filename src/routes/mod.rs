use actix_web::{http::header, HttpResponse};

pub mod default_route;
pub mod lead_route;
pub mod notification_route;
pub mod webhook_route;

/// Every page action ends back on the page (post/redirect/get).
fn see_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
