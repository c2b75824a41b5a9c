/// Business rules, one module per entity
///
/// Services translate a validated DTO into entity mutations. They own
/// the rules the HTTP layer must not know about: related ids must
/// resolve to existing rows before anything is written, an entity still
/// referenced by tasks cannot be deleted, and passwords are hashed
/// before they reach the model layer. Mutations that touch more than
/// one row run inside a single transaction.

pub mod labels;
pub mod task_statuses;
pub mod tasks;
pub mod users;
