use crate::context::AppContext;
use crate::pages::PageController;
use std::sync::Arc;

/// Shared application state
///
/// Everything inside is read-only after startup, so handlers share it
/// without locks.
#[derive(Clone)]
pub struct DemoAppState {
    /// Loaded artifacts and configuration
    pub context: Arc<AppContext>,

    /// Page controller over the same context
    pub controller: PageController,
}

impl DemoAppState {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self {
            controller: PageController::new(context.clone()),
            context,
        }
    }
}
