use std::sync::Arc;

use crate::{config::Settings, error, info, server, warning};

pub async fn serve(settings: Settings, open: bool) {
    if settings.login_required && (settings.app_username.is_none() || settings.app_password.is_none())
    {
        warning!("LOGIN_REQUIRED is set but APP_USERNAME/APP_PASSWORD are missing; nobody can log in");
    }

    let listener = match server::bind(&settings.server_address).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot start dashboard server. Err: {}", e),
    };

    if open {
        let url = format!("http://{}", settings.server_address);
        info!("Opening {}", url);
        if webbrowser::open(&url).is_err() {
            warning!("Failed to open browser. Navigate to {} manually", url);
        }
    }

    if let Err(e) = server::serve(listener, Arc::new(settings)).await {
        error!("Dashboard server stopped. Err: {}", e);
    }
}
