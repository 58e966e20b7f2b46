use actix_web::{
    delete, get, post, put,
    web::{self, Json},
    Responder, Scope,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Error,
    models::{Arguments, Queue, QueueKind, QueueUpdate},
    service::Service,
};

#[derive(Debug, Deserialize)]
pub struct CreateQueueRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default = "super::default_vhost")]
    pub vhost: String,
    #[serde(rename = "type", default)]
    pub kind: QueueKind,
    #[serde(default = "super::default_true")]
    pub durable: bool,
    #[serde(default)]
    pub exclusive: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default)]
    pub arguments: Arguments,
}

#[get("")]
async fn list_queues(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_queues()))
}

#[get("/selection")]
async fn get_selection(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.selected_queue()))
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub id: Option<String>,
}

#[put("/selection")]
async fn set_selection(
    service: web::Data<Service>,
    data: Json<SelectionRequest>,
) -> actix_web::Result<impl Responder> {
    service.select_queue(data.into_inner().id);
    Ok("OK")
}

#[get("/{id}")]
async fn get_queue(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_queue(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("queue", &*path))
}

#[post("")]
async fn create_queue(
    service: web::Data<Service>,
    data: Json<CreateQueueRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    if data.name.is_empty() {
        return Err(Error::invalid_parameter("queue name must not be empty"));
    }

    let mut queue = Queue::new(
        data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        data.name,
        data.vhost,
    );
    queue.kind = data.kind;
    queue.durable = data.durable;
    queue.exclusive = data.exclusive;
    queue.auto_delete = data.auto_delete;
    queue.arguments = data.arguments;

    Ok(Json(service.create_queue(queue)?))
}

#[put("/{id}")]
async fn update_queue(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<QueueUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_queue(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("queue", &*path))
}

#[post("/{id}/purge")]
async fn purge_queue(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .purge_queue(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("queue", &*path))
}

// Deletes are idempotent; an absent id still reports success.
#[delete("/{id}")]
async fn delete_queue(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_queue(&*path);
    Ok("OK")
}

pub fn service() -> Scope {
    web::scope("/queues")
        .service(list_queues)
        .service(get_selection)
        .service(set_selection)
        .service(create_queue)
        .service(get_queue)
        .service(update_queue)
        .service(purge_queue)
        .service(delete_queue)
}
