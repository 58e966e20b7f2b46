use actix_web::{
    delete, get, post, put,
    web::{self, Json},
    Responder, Scope,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Error,
    models::{Consumer, ConsumerUpdate},
    service::Service,
};

#[derive(Debug, Deserialize)]
pub struct CreateConsumerRequest {
    pub tag: Option<String>,
    pub queue: String,
    pub channel_id: String,
    pub connection_id: String,
    #[serde(default = "super::default_true")]
    pub ack_required: bool,
    #[serde(default)]
    pub exclusive: bool,
    pub prefetch_count: Option<u32>,
}

#[get("")]
async fn list_consumers(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_consumers()))
}

#[get("/{tag}")]
async fn get_consumer(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_consumer(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("consumer", &*path))
}

#[post("")]
async fn create_consumer(
    service: web::Data<Service>,
    data: Json<CreateConsumerRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    let mut consumer = Consumer::new(
        data.tag
            .unwrap_or_else(|| format!("ctag-{}", Uuid::new_v4())),
        data.queue,
        data.channel_id,
        data.connection_id,
    );
    consumer.ack_required = data.ack_required;
    consumer.exclusive = data.exclusive;
    if let Some(count) = data.prefetch_count {
        consumer.prefetch_count = count;
    }

    Ok(Json(service.create_consumer(consumer)?))
}

#[put("/{tag}")]
async fn update_consumer(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<ConsumerUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_consumer(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("consumer", &*path))
}

#[delete("/{tag}")]
async fn delete_consumer(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_consumer(&*path);
    Ok("OK")
}

pub fn service() -> Scope {
    web::scope("/consumers")
        .service(list_consumers)
        .service(create_consumer)
        .service(get_consumer)
        .service(update_consumer)
        .service(delete_consumer)
}
