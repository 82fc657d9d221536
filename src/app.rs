use std::sync::Arc;

use lib_core::identity::IdentityAuth;
use lib_domain::service::Service;

pub struct App {
    auth: IdentityAuth,
    service: Service,
}

pub type AppState = Arc<App>;

impl App {
    pub async fn new() -> AppState {
        let app = App {
            auth: IdentityAuth::new(),
            service: Service::new().await,
        };
        Arc::new(app)
    }

    pub fn auth(&self) -> &IdentityAuth {
        &self.auth
    }

    pub fn service(&self) -> &Service {
        &self.service
    }
}
