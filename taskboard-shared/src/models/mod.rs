/// Database entities and their SQL operations
///
/// One module per entity, each holding the row struct and the queries
/// that read and write it:
///
/// - `user`: accounts; the email doubles as the login identity
/// - `task_status`: workflow states tasks point at
/// - `label`: free-form tags, many-to-many with tasks
/// - `task`: the aggregate, returned with status/author/executor/labels
///   eagerly attached
///
/// Functions take an executor rather than a pool so the service layer can
/// run several operations inside one transaction.

pub mod label;
pub mod task;
pub mod task_status;
pub mod user;
