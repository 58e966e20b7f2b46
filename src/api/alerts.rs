use actix_web::{
    delete, get, post, put,
    web::{self, Json},
    Responder, Scope,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Error,
    models::{AlertMetric, AlertRule, AlertRuleUpdate, CompareOp, Severity},
    service::Service,
};

// ---- alert rules ----

#[derive(Debug, Deserialize)]
pub struct CreateAlertRuleRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default = "super::default_true")]
    pub enabled: bool,
    pub metric: AlertMetric,
    pub operator: CompareOp,
    pub threshold: f64,
    #[serde(default)]
    pub duration_secs: u64,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub notification_channels: Vec<String>,
}

#[get("")]
async fn list_rules(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_alert_rules()))
}

#[get("/{id}")]
async fn get_rule(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_alert_rule(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("alert rule", &*path))
}

#[post("")]
async fn create_rule(
    service: web::Data<Service>,
    data: Json<CreateAlertRuleRequest>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();

    let mut rule = AlertRule::new(
        data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        data.name,
        data.metric,
        data.operator,
        data.threshold,
    );
    rule.enabled = data.enabled;
    rule.duration_secs = data.duration_secs;
    rule.severity = data.severity;
    rule.notification_channels = data.notification_channels;

    Ok(Json(service.create_alert_rule(rule)?))
}

#[put("/{id}")]
async fn update_rule(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<AlertRuleUpdate>,
) -> Result<impl Responder, Error> {
    service
        .update_alert_rule(&*path, data.into_inner())
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("alert rule", &*path))
}

#[delete("/{id}")]
async fn delete_rule(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete_alert_rule(&*path);
    Ok("OK")
}

pub fn rules() -> Scope {
    web::scope("/alert-rules")
        .service(list_rules)
        .service(create_rule)
        .service(get_rule)
        .service(update_rule)
        .service(delete_rule)
}

// ---- alerts ----

#[get("")]
async fn list_alerts(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_alerts()))
}

#[get("/{id}")]
async fn get_alert(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .get_alert(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("alert", &*path))
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub fired: usize,
}

/// Sweeps every enabled rule against current queue metrics.
#[post("/evaluate")]
async fn evaluate(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(EvaluateResponse {
        fired: service.evaluate_rules(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AcknowledgeRequest {
    pub actor: String,
}

#[post("/{id}/acknowledge")]
async fn acknowledge_alert(
    service: web::Data<Service>,
    path: web::Path<String>,
    data: Json<AcknowledgeRequest>,
) -> Result<impl Responder, Error> {
    service
        .acknowledge_alert(&*path, data.into_inner().actor)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("active alert", &*path))
}

#[post("/{id}/resolve")]
async fn resolve_alert(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    service
        .resolve_alert(&*path)
        .map(Json)
        .ok_or_else(|| Error::entity_not_found("alert", &*path))
}

// Dismissal deletes; like every delete it is idempotent.
#[delete("/{id}")]
async fn dismiss_alert(
    service: web::Data<Service>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.dismiss_alert(&*path);
    Ok("OK")
}

pub fn service() -> Scope {
    web::scope("/alerts")
        .service(list_alerts)
        .service(evaluate)
        .service(get_alert)
        .service(acknowledge_alert)
        .service(resolve_alert)
        .service(dismiss_alert)
}

// ---- events ----

#[get("")]
async fn list_events(service: web::Data<Service>) -> actix_web::Result<impl Responder> {
    Ok(Json(service.list_events()))
}

pub fn events() -> Scope {
    web::scope("/events").service(list_events)
}
