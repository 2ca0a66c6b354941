use salvo::Depot;
use tracing::error;

use crate::error::AppError;
use crate::{config::get_config_from_depot, db_handler::get_db_from_depot};
use helpline_service::auth::{authenticate::authenticate, depot::depot_keys};

/// ## Summary
/// Authentication middleware that resolves the caller and stores the identity in the depot.
///
/// ## Side Effects
/// Inserts the identity into the depot under `depot_keys::AUTHENTICATED_IDENTITY`
/// and records the caller in the user directory.
///
/// ## Errors
/// Responds 401 if the identity headers are missing or malformed, 503 if no
/// database connection is available, and 500 for other failures.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                e.render_into(res);
                ctrl.skip_rest();
                return;
            }
        };

        let provider = match get_db_from_depot(depot) {
            Ok(p) => p,
            Err(e) => {
                error!(error = ?e, "Failed to get database provider from depot");
                e.render_into(res);
                ctrl.skip_rest();
                return;
            }
        };

        let mut conn = match provider.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!(error = ?e, "Failed to get database connection");
                AppError::from(e).render_into(res);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, &mut conn, &config).await {
            Ok(identity) => {
                tracing::debug!(
                    user_id = %identity.user.id,
                    role = ?identity.role,
                    "User authenticated successfully"
                );
                depot.insert(depot_keys::AUTHENTICATED_IDENTITY, identity);
            }
            Err(service_err) => {
                AppError::from(service_err).render_into(res);
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Middleware handler for authentication.
/// Use this as a handler in routes to protect them with authentication.
pub struct AuthMiddleware;
