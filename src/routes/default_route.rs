use actix_web::{get, web, HttpResponse, Responder};
use askama::Template;
use chrono::Utc;

use crate::{
    domain::{
        present, Lead, LeadCountChoice, NotificationEvent, Session, LEAD_COUNT_PRESETS,
        MAX_LEAD_COUNT,
    },
    services::SessionStore,
};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    search_query: String,
    location: String,
    category: String,
    lead_count_options: Vec<LeadCountOption>,
    webhook_url: String,
    leads: Vec<LeadCard>,
    notifications: Vec<NotificationView>,
    is_generating: bool,
    is_sending: bool,
}

struct LeadCountOption {
    value: String,
    label: String,
    checked: bool,
}

struct LeadCard {
    name: String,
    best_thing: String,
    has_rating: bool,
    rating: String,
    rows: Vec<InfoRow>,
}

struct InfoRow {
    label: &'static str,
    value: String,
    is_link: bool,
}

struct NotificationView {
    id: i64,
    message: String,
    kind: &'static str,
}

impl From<&Lead> for LeadCard {
    fn from(lead: &Lead) -> Self {
        let rows = [
            ("Address", lead.place.as_str()),
            ("Contact", lead.contact.as_str()),
            ("Website", lead.website_link.as_str()),
            ("Hours", lead.opening_time.as_str()),
            ("No.", lead.no.as_str()),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            present(value).map(|value| InfoRow {
                label,
                value: value.to_string(),
                is_link: label == "Website" && lead.website_href().is_some(),
            })
        })
        .collect();

        let rating = lead.rating_label();
        LeadCard {
            name: lead.name.clone(),
            best_thing: lead.best_thing.clone(),
            has_rating: rating.is_some(),
            rating: rating.unwrap_or_default(),
            rows,
        }
    }
}

impl From<&NotificationEvent> for NotificationView {
    fn from(n: &NotificationEvent) -> Self {
        NotificationView {
            id: n.id,
            message: n.message.clone(),
            kind: n.kind.as_str(),
        }
    }
}

fn lead_count_options(selected: LeadCountChoice) -> Vec<LeadCountOption> {
    LEAD_COUNT_PRESETS
        .into_iter()
        .map(LeadCountChoice::Preset)
        .chain(std::iter::once(LeadCountChoice::Unlimited))
        .map(|choice| LeadCountOption {
            value: choice.as_form_value(),
            label: match choice {
                LeadCountChoice::Preset(n) => n.to_string(),
                LeadCountChoice::Unlimited => "Unlimited".to_string(),
            },
            checked: choice == selected,
        })
        .collect()
}

impl From<Session> for IndexTemplate {
    fn from(session: Session) -> Self {
        let selected = match &session.form {
            Some(form) if form.lead_count.get() == MAX_LEAD_COUNT => LeadCountChoice::Unlimited,
            Some(form) => LeadCountChoice::Preset(form.lead_count.get()),
            None => LeadCountChoice::default(),
        };
        let notifications = session.notifications.clone().expire(Utc::now());

        IndexTemplate {
            search_query: session
                .form
                .as_ref()
                .map(|f| f.search_query.clone())
                .unwrap_or_default(),
            location: session
                .form
                .as_ref()
                .map(|f| f.location.clone())
                .unwrap_or_default(),
            category: session
                .form
                .as_ref()
                .map(|f| f.category.clone())
                .unwrap_or_default(),
            lead_count_options: lead_count_options(selected),
            webhook_url: session
                .webhook
                .as_ref()
                .map(|w| w.as_ref().to_string())
                .unwrap_or_default(),
            leads: session.leads.iter().map(LeadCard::from).collect(),
            notifications: notifications.items().iter().map(Into::into).collect(),
            is_generating: session.is_generating(),
            is_sending: session.is_sending(),
        }
    }
}

#[get("/")]
async fn index(sessions: web::Data<SessionStore>) -> HttpResponse {
    match IndexTemplate::from(sessions.snapshot()).render() {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(e) => {
            log::error!("Failed to render index page: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}
