use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use helpline_core::error::CoreError;
use helpline_service::attachment::AttachmentStore;

/// Injects the attachment store into the depot.
pub struct AttachmentStoreHandler {
    pub store: Arc<dyn AttachmentStore>,
}

#[async_trait]
impl salvo::Handler for AttachmentStoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

/// ## Summary
/// Retrieves the attachment store from the depot.
///
/// ## Errors
/// Returns an error if the attachment store is not found in the depot.
pub fn get_attachment_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn AttachmentStore>> {
    depot
        .obtain::<Arc<dyn AttachmentStore>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Attachment store not found in depot").into())
}
