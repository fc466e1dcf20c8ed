use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    domain::{
        LeadCountChoice, SearchInput, SearchRequest, SessionEvent, UserLocation, ValidationError,
    },
    services::{GenerationError, GenerationProvider, SessionStore},
};

use super::see_home;

#[derive(Deserialize)]
struct SearchForm {
    #[serde(default)]
    search_query: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    lead_count: String,
    #[serde(default)]
    latitude: String,
    #[serde(default)]
    longitude: String,
}

impl SearchForm {
    fn into_request(self) -> Result<SearchRequest, ValidationError> {
        let choice = match self.lead_count.trim() {
            "" => LeadCountChoice::default(),
            raw => raw.parse()?,
        };
        SearchRequest::parse(
            &self.search_query,
            &self.location,
            Some(self.category.as_str()),
            choice.resolve()?,
            parse_location(&self.latitude, &self.longitude),
        )
    }
}

/// Browsers without geolocation leave both fields blank.
fn parse_location(latitude: &str, longitude: &str) -> Option<UserLocation> {
    let latitude = latitude.trim().parse().ok()?;
    let longitude = longitude.trim().parse().ok()?;
    UserLocation::parse(latitude, longitude)
}

#[post("/generate")]
async fn generate_leads(
    form: web::Form<SearchForm>,
    sessions: web::Data<SessionStore>,
    provider: web::Data<dyn GenerationProvider>,
) -> HttpResponse {
    let request = match form.into_inner().into_request() {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Rejected search form: {}", e);
            sessions.apply(SessionEvent::warning(&e));
            return see_home();
        }
    };

    if !sessions.begin_generation(request.clone()) {
        return see_home();
    }

    match provider.generate(&request).await {
        Ok(leads) => {
            log::info!("Generated {} leads for {:?}", leads.len(), request.search_query);
            sessions.apply(SessionEvent::GenerationSucceeded(leads));
        }
        Err(e) => {
            log::error!("Lead generation failed: {:?}", e);
            sessions.apply(SessionEvent::GenerationFailed(e.to_string()));
        }
    }

    see_home()
}

#[get("/leads/export")]
async fn export_leads(sessions: web::Data<SessionStore>) -> HttpResponse {
    let leads = sessions.snapshot().leads;
    match serde_json::to_string_pretty(&json!({ "leads": leads })) {
        Ok(body) => HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Err(e) => {
            log::error!("Failed to serialize leads: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Stateless generation for programmatic clients.
#[post("/leads")]
async fn create_leads(
    body: web::Json<SearchInput>,
    provider: web::Data<dyn GenerationProvider>,
) -> HttpResponse {
    let request = match SearchRequest::try_from(body.into_inner()) {
        Ok(request) => request,
        Err(e) => return HttpResponse::BadRequest().json(json!({ "error": e.to_string() })),
    };

    match provider.generate(&request).await {
        Ok(leads) => HttpResponse::Ok().json(leads),
        Err(e) => {
            log::error!("Lead generation failed: {:?}", e);
            let mut response = match e {
                GenerationError::MissingCredentials | GenerationError::InvalidCredentials => {
                    HttpResponse::ServiceUnavailable()
                }
                _ => HttpResponse::BadGateway(),
            };
            response.json(json!({ "error": e.to_string() }))
        }
    }
}
