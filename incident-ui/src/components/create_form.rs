use crate::app::SharedApi;
use incident_core::{CreateForm, FormEvent, Incident, Liveness, Severity};
use leptos::ev::SubmitEvent;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

/// Draft form for a new incident. Reports the server's record through `on_created`.
#[component]
pub fn CreateIncidentForm(api: SharedApi, #[prop(into)] on_created: Callback<Incident>) -> impl IntoView {
    let form = create_rw_signal(CreateForm::default());
    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });
    let liveness = store_value(liveness);
    let api = store_value(api);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let draft = match form.try_update(CreateForm::begin_submit) {
            Some(Ok(draft)) => draft,
            Some(Err(err)) => {
                tracing::debug!(error = %err, "submit refused");
                return;
            }
            None => return,
        };

        let api = api.get_value();
        let liveness = liveness.get_value();
        spawn_local(async move {
            let result = api.create_incident(&draft).await;
            let event = liveness
                .guard("create incident", || form.try_update(|f| f.finish_submit(result)))
                .flatten()
                .flatten();
            if let Some(FormEvent::Created(incident)) = event {
                on_created.call(incident);
            }
        });
    };

    view! {
      <div class="form-container">
        <h2>"Create New Incident"</h2>
        <form on:submit=submit>
          <div class="form-group">
            <label for="source">"Source"</label>
            <input
              id="source"
              type="text"
              prop:value=move || form.with(|f| f.source().to_string())
              on:input=move |ev| form.update(|f| f.set_source(event_target_value(&ev)))
              placeholder="e.g., Prometheus, Grafana"
              required=true
            />
          </div>
          <div class="form-group">
            <label for="message">"Message"</label>
            <textarea
              id="message"
              prop:value=move || form.with(|f| f.message().to_string())
              on:input=move |ev| form.update(|f| f.set_message(event_target_value(&ev)))
              placeholder="Describe the incident..."
              required=true
            />
          </div>
          <div class="form-group">
            <label for="severity">"Severity"</label>
            <select
              id="severity"
              on:change=move |ev| { match event_target_value(&ev).parse::<Severity>() {
                  Ok(severity) => form.update(|f| f.set_severity(severity)),
                  Err(err) => tracing::warn!(error = %err, "ignoring unknown severity option"),
              } }
            >
              {Severity::ALL
                  .into_iter()
                  .map(|choice| view! {
                    <option
                      value=choice.as_str()
                      prop:selected=move || form.with(|f| f.severity() == choice)
                    >
                      {choice.label()}
                    </option>
                  })
                  .collect_view()}
            </select>
          </div>
          <button type="submit" disabled=move || form.with(CreateForm::is_submitting)>
            {move || form.with(CreateForm::submit_label)}
          </button>
          {move || form.with(|f| f.error().map(|e| view! { <p class="form-error">{e.to_string()}</p> }))}
        </form>
      </div>
    }
}
