/// HTTP handlers organized by resource
///
/// - `health`: liveness endpoint
/// - `session`: login and token issuance
/// - `users`: registration and user CRUD
/// - `task_statuses`: workflow status CRUD
/// - `labels`: label CRUD
/// - `tasks`: task CRUD and filtered listing

pub mod health;
pub mod labels;
pub mod session;
pub mod task_statuses;
pub mod tasks;
pub mod users;
