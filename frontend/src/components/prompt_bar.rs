use crate::api;
use crate::store::{Action, StoreContext};
use shared::models::Character;
use std::time::Duration;
use uuid::Uuid;
use yew::prelude::*;

const JOB_REFRESH_INTERVAL: Duration = Duration::from_secs(3);

/// Follow a job until the server settles it.
///
/// A failed job may have reset the key gate, so the session is re-read
/// once the job is done.
pub fn track_job(store: StoreContext, video_id: Uuid) {
    yew::platform::spawn_local(async move {
        loop {
            yew::platform::time::sleep(JOB_REFRESH_INTERVAL).await;
            match api::get_video(video_id).await {
                Ok(video) => {
                    let settled = video.status.is_terminal();
                    store.dispatch(Action::UpsertVideo(video));
                    if settled {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to refresh video {}: {}", video_id, e);
                    return;
                }
            }
        }
        if let Ok(status) = api::fetch_session().await {
            store.dispatch(Action::SetKeyStatus(status));
        }
    });
}

fn prompt_label(selected: Option<&Character>) -> String {
    match selected {
        Some(character) => format!("Scene Prompt for \"{}\"", character.name),
        None => "Scene Prompt (No Character Selected)".to_string(),
    }
}

/// The prompt as typed, or `None` when it is blank.
fn submission_prompt(prompt: &str) -> Option<String> {
    (!prompt.trim().is_empty()).then(|| prompt.to_string())
}

#[function_component(PromptBar)]
pub fn prompt_bar() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let prompt = use_state(String::new);
    let error = use_state(|| None::<String>);

    let selected = store.selected_character();
    let label = prompt_label(selected);

    let on_input = {
        let prompt = prompt.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            prompt.set(input.value());
        })
    };

    let on_generate = {
        let store = store.clone();
        let prompt = prompt.clone();
        let error = error.clone();
        Callback::from(move |_| {
            let Some(text) = submission_prompt(&prompt) else {
                return;
            };
            prompt.set(String::new());
            error.set(None);

            let store = store.clone();
            let error = error.clone();
            let character_id = store.selected_character_id;
            yew::platform::spawn_local(async move {
                match api::generate_video(text, character_id).await {
                    Ok(video) => {
                        let id = video.id;
                        store.dispatch(Action::UpsertVideo(video));
                        track_job(store.clone(), id);
                    }
                    Err(e) => {
                        tracing::error!("Failed to submit video: {}", e);
                        error.set(Some(e.to_string()));
                        if let Ok(status) = api::fetch_session().await {
                            store.dispatch(Action::SetKeyStatus(status));
                        }
                    }
                }
            });
        })
    };

    html! {
        <div class="prompt-bar">
            <label class="form-label">{label}</label>
            <textarea class="form-textarea" rows="3"
                value={(*prompt).clone()}
                oninput={on_input}
                placeholder="A lighthouse keeper walks along the cliffs at dawn..."
            />
            <div class="prompt-footer">
                <div class="badges">
                    <span class="badge">{"720p"}</span>
                    <span class="badge">{"16:9"}</span>
                    if selected.is_some() {
                        <span class="badge accent">{"Character continuity"}</span>
                    }
                </div>
                <button class="btn btn-primary" onclick={on_generate} disabled={prompt.trim().is_empty()}>
                    {"Generate"}
                </button>
            </div>
            if let Some(message) = &*error {
                <div class="error-banner">{message}</div>
            }
        </div>
    }
}
