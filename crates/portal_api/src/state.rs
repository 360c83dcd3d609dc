use portal_service::PortalService;

/// Shared application state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: PortalService,
}
