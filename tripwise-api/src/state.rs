use std::sync::Arc;
use tripwise_booking::SessionHandle;
use tripwise_catalog::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub catalog: Arc<Catalog>,
}
