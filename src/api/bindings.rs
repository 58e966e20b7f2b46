use actix_web::{
    delete, get, post,
    web::{self, Json},
    Responder, Scope,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Error,
    models::{Arguments, Binding, DestinationKind},
    routing,
    service::Service,
};

#[derive(Debug, Deserialize)]
pub struct CreateBindingRequest {
    pub id: Option<String>,
    #[serde(default = "super::default_vhost")]
    pub vhost: String,
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub destination_kind: DestinationKind,
    /// When omitted, a default pattern is generated from the source
    /// exchange's kind and the destination's name.
    pub routing_key: Option<String>,
    #[serde(default)]
    pub arguments: Arguments,
}

#[get("")]
async fn list_bindings(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_bindings()))
}

#[get("/{id}")]
async fn get_binding(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_binding(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("binding", &*path))
}

#[post("")]
async fn create_binding(
    service: web::Data<Service>,
    data: Json<CreateBindingRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    let routing_key = match data.routing_key {
        Some(key) => key,
        None => {
            let exchange = service
                .get_exchange(&data.source)
                .ok_or_else(|| Error::entity_not_found("exchange", &data.source))?;
            let base = match data.destination_kind {
                DestinationKind::Queue => service.get_queue(&data.destination).map(|q| q.name),
                DestinationKind::Exchange => {
                    service.get_exchange(&data.destination).map(|e| e.name)
                }
            }
            .ok_or_else(|| Error::entity_not_found("destination", &data.destination))?;
            routing::generate_pattern(&exchange.kind, &base)
        }
    };

    let binding = Binding {
        id: data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        vhost: data.vhost,
        source: data.source,
        destination: data.destination,
        destination_kind: data.destination_kind,
        routing_key,
        arguments: data.arguments,
    };

    Ok(Json(service.create_binding(binding)?))
}

#[delete("/{id}")]
async fn delete_binding(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_binding(&*path);
    Ok("OK")
}

pub fn service() -> Scope {
    web::scope("/bindings")
        .service(list_bindings)
        .service(create_binding)
        .service(get_binding)
        .service(delete_binding)
}
