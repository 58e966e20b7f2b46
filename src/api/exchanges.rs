use actix_web::{
    delete, get, post, put,
    web::{self, Json},
    Responder, Scope,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Error,
    models::{Arguments, Exchange, ExchangeKind, ExchangeUpdate},
    service::Service,
};

#[derive(Debug, Deserialize)]
pub struct CreateExchangeRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default = "super::default_vhost")]
    pub vhost: String,
    #[serde(rename = "type", default)]
    pub kind: ExchangeKind,
    #[serde(default = "super::default_true")]
    pub durable: bool,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub arguments: Arguments,
}

#[get("")]
async fn list_exchanges(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_exchanges()))
}

#[get("/selection")]
async fn get_selection(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.selected_exchange()))
}

#[put("/selection")]
async fn set_selection(
    service: web::Data<Service>,
    data: Json<super::queues::SelectionRequest>,
) -> actix_web::Result<impl Responder> {
    service.select_exchange(data.into_inner().id);
    Ok("OK")
}

#[get("/{id}")]
async fn get_exchange(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_exchange(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("exchange", &*path))
}

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub routing_key: String,
}

/// Topology query: which bindings on this exchange a routing key would follow.
#[get("/{id}/match")]
async fn match_bindings(
    service: web::Data<Service>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> Result<impl Responder, Error> {
    if service.get_exchange(&*path).is_none() {
        return Err(Error::entity_not_found("exchange", &*path));
    }
    Ok(Json(service.match_bindings(&*path, &query.routing_key)))
}

#[post("")]
async fn create_exchange(
    service: web::Data<Service>,
    data: Json<CreateExchangeRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    if data.name.is_empty() {
        return Err(Error::invalid_parameter("exchange name must not be empty"));
    }

    let mut exchange = Exchange::new(
        data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        data.name,
        data.vhost,
    );
    exchange.kind = data.kind;
    exchange.durable = data.durable;
    exchange.internal = data.internal;
    exchange.arguments = data.arguments;

    Ok(Json(service.create_exchange(exchange)?))
}

#[put("/{id}")]
async fn update_exchange(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<ExchangeUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_exchange(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("exchange", &*path))
}

#[delete("/{id}")]
async fn delete_exchange(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_exchange(&*path);
    Ok("OK")
}

pub fn service() -> Scope {
    web::scope("/exchanges")
        .service(list_exchanges)
        .service(get_selection)
        .service(set_selection)
        .service(create_exchange)
        .service(get_exchange)
        .service(match_bindings)
        .service(update_exchange)
        .service(delete_exchange)
}
