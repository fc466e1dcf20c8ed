use actix_web::{post, web, HttpResponse};

use crate::{domain::SessionEvent, services::SessionStore};

use super::see_home;

#[post("/{id}/dismiss")]
async fn dismiss_notification(
    path: web::Path<i64>,
    sessions: web::Data<SessionStore>,
) -> HttpResponse {
    sessions.apply(SessionEvent::NotificationDismissed(path.into_inner()));
    see_home()
}
