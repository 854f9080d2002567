use crate::{config::Settings, info, types::Term, utils, warning};

pub fn refresh(settings: &Settings, term: Option<Term>) {
    let url = utils::refresh_url(settings, term);
    info!("Opening {}", url);

    if webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }
}
