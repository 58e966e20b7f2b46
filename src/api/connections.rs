use actix_web::{
    delete, get, post, put,
    web::{self, Json},
    Responder, Scope,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Error,
    models::{Connection, ConnectionUpdate},
    service::Service,
};

#[derive(Debug, Deserialize)]
pub struct CreateConnectionRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default = "super::default_vhost")]
    pub vhost: String,
    pub user: Option<String>,
    pub peer_host: Option<String>,
    pub peer_port: Option<u16>,
    #[serde(default)]
    pub tls: bool,
}

#[get("")]
async fn list_connections(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_connections()))
}

#[get("/selection")]
async fn get_selection(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.selected_connection()))
}

#[put("/selection")]
async fn set_selection(
    service: web::Data<Service>,
    data: Json<super::queues::SelectionRequest>,
) -> actix_web::Result<impl Responder> {
    service.select_connection(data.into_inner().id);
    Ok("OK")
}

#[get("/{id}")]
async fn get_connection(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_connection(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("connection", &*path))
}

#[post("")]
async fn create_connection(
    service: web::Data<Service>,
    data: Json<CreateConnectionRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    let mut connection = Connection::new(
        data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        data.name,
        data.vhost,
    );
    if let Some(user) = data.user {
        connection.user = user;
    }
    if let Some(host) = data.peer_host {
        connection.peer_host = host;
    }
    if let Some(port) = data.peer_port {
        connection.peer_port = port;
    }
    connection.tls = data.tls;

    Ok(Json(service.create_connection(connection)?))
}

#[put("/{id}")]
async fn update_connection(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<ConnectionUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_connection(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("connection", &*path))
}

/// Closing a connection tears down its channels and consumers in the same
/// call; deleting twice is still success.
#[delete("/{id}")]
async fn delete_connection(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_connection(&*path);
    Ok("OK")
}

pub fn service() -> Scope {
    web::scope("/connections")
        .service(list_connections)
        .service(get_selection)
        .service(set_selection)
        .service(create_connection)
        .service(get_connection)
        .service(update_connection)
        .service(delete_connection)
}
