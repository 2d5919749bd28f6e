use std::sync::Arc;

use crate::scoring::ScoringService;

#[derive(Clone)]
pub struct HandlerState {
    pub service: Arc<ScoringService>,
}

impl HandlerState {
    pub fn new(service: ScoringService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
