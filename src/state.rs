use crate::input::DirectInput;
use crate::models::Route;
use std::sync::Arc;

/// Shared application state, read-only once the server starts
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<[Route]>,
    pub direct_input: Option<DirectInput>,
}

impl AppState {
    pub fn new(routes: Vec<Route>, direct_input: Option<DirectInput>) -> Self {
        Self {
            routes: routes.into(),
            direct_input,
        }
    }
}
