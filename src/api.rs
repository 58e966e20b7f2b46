pub mod admin;
pub mod alerts;
pub mod bindings;
pub mod channels;
pub mod connections;
pub mod consumers;
pub mod exchanges;
pub mod queues;

pub(crate) fn default_vhost() -> String {
    "/".to_owned()
}

pub(crate) fn default_pattern() -> String {
    ".*".to_owned()
}

pub(crate) fn default_true() -> bool {
    true
}
