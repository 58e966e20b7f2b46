use actix_web::{
    delete, get, post, put,
    web::{self, Json},
    Responder, Scope,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Error,
    models::{
        Arguments, Permission, PermissionUpdate, Policy, PolicyTarget, PolicyUpdate, User,
        UserUpdate, VirtualHost, VirtualHostUpdate,
    },
    service::Service,
};

// ---- vhosts ----

#[derive(Debug, Deserialize)]
pub struct CreateVhostRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[get("")]
async fn list_vhosts(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_vhosts()))
}

#[get("/{id}")]
async fn get_vhost(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_vhost(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("vhost", &*path))
}

#[post("")]
async fn create_vhost(
    service: web::Data<Service>,
    data: Json<CreateVhostRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    Ok(Json(service.create_vhost(VirtualHost {
        id: data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        name: data.name,
        description: data.description,
    })?))
}

#[put("/{id}")]
async fn update_vhost(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<VirtualHostUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_vhost(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("vhost", &*path))
}

#[delete("/{id}")]
async fn delete_vhost(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_vhost(&*path);
    Ok("OK")
}

pub fn vhosts() -> Scope {
    web::scope("/vhosts")
        .service(list_vhosts)
        .service(create_vhost)
        .service(get_vhost)
        .service(update_vhost)
        .service(delete_vhost)
}

// ---- users ----

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[get("")]
async fn list_users(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_users()))
}

#[get("/{id}")]
async fn get_user(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_user(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("user", &*path))
}

#[post("")]
async fn create_user(
    service: web::Data<Service>,
    data: Json<CreateUserRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    Ok(Json(service.create_user(User {
        id: data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        name: data.name,
        tags: data.tags,
    })?))
}

#[put("/{id}")]
async fn update_user(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<UserUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_user(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("user", &*path))
}

#[delete("/{id}")]
async fn delete_user(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_user(&*path);
    Ok("OK")
}

pub fn users() -> Scope {
    web::scope("/users")
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
}

// ---- permissions ----

#[derive(Debug, Deserialize)]
pub struct CreatePermissionRequest {
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default = "super::default_vhost")]
    pub vhost: String,
    #[serde(default = "super::default_pattern")]
    pub configure: String,
    #[serde(default = "super::default_pattern")]
    pub write: String,
    #[serde(default = "super::default_pattern")]
    pub read: String,
}

#[get("")]
async fn list_permissions(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_permissions()))
}

#[get("/{id}")]
async fn get_permission(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_permission(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("permission", &*path))
}

#[post("")]
async fn create_permission(
    service: web::Data<Service>,
    data: Json<CreatePermissionRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    Ok(Json(service.create_permission(Permission {
        id: data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        user_id: data.user_id,
        vhost: data.vhost,
        configure: data.configure,
        write: data.write,
        read: data.read,
    })?))
}

#[put("/{id}")]
async fn update_permission(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<PermissionUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_permission(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("permission", &*path))
}

#[delete("/{id}")]
async fn delete_permission(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_permission(&*path);
    Ok("OK")
}

pub fn permissions() -> Scope {
    web::scope("/permissions")
        .service(list_permissions)
        .service(create_permission)
        .service(get_permission)
        .service(update_permission)
        .service(delete_permission)
}

// ---- policies ----

#[derive(Debug, Deserialize)]
pub struct CreatePolicyRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default = "super::default_vhost")]
    pub vhost: String,
    pub pattern: String,
    #[serde(default)]
    pub apply_to: PolicyTarget,
    #[serde(default)]
    pub definition: Arguments,
    #[serde(default)]
    pub priority: i32,
}

#[get("")]
async fn list_policies(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_policies()))
}

#[get("/{id}")]
async fn get_policy(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_policy(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("policy", &*path))
}

#[post("")]
async fn create_policy(
    service: web::Data<Service>,
    data: Json<CreatePolicyRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    Ok(Json(service.create_policy(Policy {
        id: data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        name: data.name,
        vhost: data.vhost,
        pattern: data.pattern,
        apply_to: data.apply_to,
        definition: data.definition,
        priority: data.priority,
    })?))
}

#[put("/{id}")]
async fn update_policy(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<PolicyUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_policy(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("policy", &*path))
}

#[delete("/{id}")]
async fn delete_policy(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_policy(&*path);
    Ok("OK")
}

pub fn policies() -> Scope {
    web::scope("/policies")
        .service(list_policies)
        .service(create_policy)
        .service(get_policy)
        .service(update_policy)
        .service(delete_policy)
}
