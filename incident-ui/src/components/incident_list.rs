use crate::app::SharedApi;
use crate::components::create_form::CreateIncidentForm;
use incident_core::row::COLUMNS;
use incident_core::{Incident, IncidentList, IncidentRow, ListPhase, Liveness, Status, TableRow};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

fn notify(message: &str) {
    if let Err(err) = window().alert_with_message(message) {
        tracing::warn!(?err, "alert failed");
    }
}

#[component]
pub fn IncidentListView(api: SharedApi) -> impl IntoView {
    let list = create_rw_signal(IncidentList::new());
    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });
    let liveness = store_value(liveness);
    let api = store_value(api);

    // Runs once per mount.
    list.update(IncidentList::begin_load);
    spawn_local({
        let api = api.get_value();
        let liveness = liveness.get_value();
        async move {
            let result = api.list_incidents().await;
            liveness.guard("list incidents", || list.update(|l| l.finish_load(result)));
        }
    });

    let change_status = move |incident_id: String, status: Status| {
        tracing::debug!(id = %incident_id, %status, "requesting status change");
        let api = api.get_value();
        let liveness = liveness.get_value();
        spawn_local(async move {
            let result = api.update_status(&incident_id, status).await;
            let outcome = liveness
                .guard("update status", || {
                    list.try_update(|l| l.apply_status_update(&incident_id, result))
                })
                .flatten();
            if let Some(notice) = outcome.and_then(|o| o.notice()) {
                notify(notice);
            }
        });
    };

    let on_created = move |incident: Incident| list.update(|l| l.prepend(incident));

    let phase = create_memo(move |_| list.with(IncidentList::phase));
    // Rows follow the list revision, which also moves on failed attempts.
    let revision = create_memo(move |_| list.with(IncidentList::revision));

    move || match phase.get() {
        ListPhase::Loading => view! { <div class="loading">"Loading incidents..."</div> }.into_view(),
        ListPhase::Failed(message) => view! { <div class="error-message">{message}</div> }.into_view(),
        ListPhase::Ready => view! {
          <CreateIncidentForm api=api.get_value() on_created=on_created/>
          <div class="incident-table-container">
            <table>
              <thead>
                <tr>
                  {COLUMNS.into_iter().map(|title| view! { <th>{title}</th> }).collect_view()}
                </tr>
              </thead>
              <tbody>
                {move || {
                    revision.track();
                    list.with_untracked(IncidentList::table_rows)
                        .into_iter()
                        .map(|row| table_row(row, change_status))
                        .collect_view()
                }}
              </tbody>
            </table>
          </div>
        }
        .into_view(),
    }
}

fn table_row(row: TableRow, change_status: impl Fn(String, Status) + Copy + 'static) -> View {
    match row {
        TableRow::Placeholder { text, colspan } => view! {
          <tr>
            <td colspan=colspan>{text}</td>
          </tr>
        }
        .into_view(),
        TableRow::Incident(row) => incident_row(row, change_status),
    }
}

fn incident_row(row: IncidentRow, change_status: impl Fn(String, Status) + Copy + 'static) -> View {
    let IncidentRow {
        id,
        timestamp,
        category,
        source,
        message,
        severity,
        status,
    } = row;

    view! {
      <tr>
        <td>{timestamp}</td>
        <td>{category}</td>
        <td>{source}</td>
        <td>{message}</td>
        <td class={severity.css_class()}>{severity.as_str()}</td>
        <td>
          <select
            class={status.css_class()}
            on:change=move |ev| { match event_target_value(&ev).parse::<Status>() {
                Ok(next) => change_status(id.clone(), next),
                Err(err) => tracing::warn!(error = %err, "ignoring unknown status option"),
            } }
          >
            {Status::ALL
                .into_iter()
                .map(|choice| view! {
                  <option value=choice.as_str() selected={choice == status}>{choice.label()}</option>
                })
                .collect_view()}
          </select>
        </td>
      </tr>
    }
    .into_view()
}
