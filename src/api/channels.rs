use actix_web::{
    delete, get, post, put,
    web::{self, Json},
    Responder, Scope,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Error,
    models::{Channel, ChannelUpdate},
    service::Service,
};

#[derive(Debug, Deserialize)]
pub struct CreateChannelRequest {
    pub id: Option<String>,
    pub connection_id: String,
    pub number: u32,
    pub prefetch_count: Option<u32>,
}

#[get("")]
async fn list_channels(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_channels()))
}

#[get("/{id}")]
async fn get_channel(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_channel(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("channel", &*path))
}

#[post("")]
async fn create_channel(
    service: web::Data<Service>,
    data: Json<CreateChannelRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    let mut channel = Channel::new(
        data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        data.connection_id,
        data.number,
    );
    if let Some(count) = data.prefetch_count {
        channel.prefetch_count = count;
    }

    Ok(Json(service.create_channel(channel)?))
}

#[put("/{id}")]
async fn update_channel(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<ChannelUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_channel(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("channel", &*path))
}

#[delete("/{id}")]
async fn delete_channel(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_channel(&*path);
    Ok("OK")
}

pub fn service() -> Scope {
    web::scope("/channels")
        .service(list_channels)
        .service(create_channel)
        .service(get_channel)
        .service(update_channel)
        .service(delete_channel)
}
