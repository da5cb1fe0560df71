use crate::query::QueryDispatcher;

/// Shared application state. The dispatcher is the only piece of state the
/// routes need; it is immutable after startup.
pub struct AppState {
    pub dispatcher: QueryDispatcher,
}
