mod app;
mod logging;

pub mod components {
    pub mod create_form;
    pub mod incident_list;
}

use app::App;
use incident_core::ApiConfig;
use leptos::*;

fn main() {
    logging::init();

    // A browser has no process environment; the backend url is fixed at build time.
    match ApiConfig::from_value(option_env!("INCIDENT_API_URL")) {
        Ok(config) => mount_to_body(move || view! { <App config=config/> }),
        Err(err) => {
            tracing::error!(error = %err, "invalid backend url");
            mount_to_body(move || {
                view! { <div class="error-message">{format!("Dashboard is misconfigured: {err}")}</div> }
            })
        }
    }
}
