use crate::components::incident_list::IncidentListView;
use incident_core::{ApiConfig, HttpIncidentApi, IncidentApi};
use leptos::*;
use std::rc::Rc;

/// Backend handle shared by every component on the page.
pub type SharedApi = Rc<dyn IncidentApi>;

#[component]
pub fn App(config: ApiConfig) -> impl IntoView {
    tracing::info!(backend = %config.base_url(), "starting incident dashboard");
    let api: SharedApi = Rc::new(HttpIncidentApi::new(config));

    view! {
      <div class="App">
        <header class="App-header">
          <h1>"Incident Response Dashboard"</h1>
        </header>
        <main>
          <IncidentListView api=api/>
        </main>
      </div>
    }
}
