use crate::api;
use crate::store::{Action, StoreContext};
use shared::models::MAX_REFERENCE_IMAGES;
use yew::prelude::*;

#[function_component(CharModal)]
pub fn char_modal() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    let name = use_state(String::new);
    let images = use_state(Vec::<web_sys::File>::new);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let can_save = !name.trim().is_empty() && !images.is_empty() && !*saving;

    let on_save = {
        let store = store.clone();
        let name = name.clone();
        let images = images.clone();
        let saving = saving.clone();
        let error = error.clone();

        Callback::from(move |_| {
            let store = store.clone();
            let name = (*name).clone();
            let images = (*images).clone();
            let saving = saving.clone();
            let error = error.clone();
            saving.set(true);
            yew::platform::spawn_local(async move {
                match api::upload_character(&name, &images).await {
                    Ok(character) => {
                        store.dispatch(Action::AddCharacter(character));
                        store.dispatch(Action::CloseModal);
                    }
                    Err(e) => {
                        tracing::error!("Failed to create character: {}", e);
                        error.set(Some(e.to_string()));
                        saving.set(false);
                    }
                }
            });
        })
    };

    let on_files = {
        let images = images.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Some(files) = input.files() {
                let selected = (0..files.length())
                    .filter_map(|i| files.get(i))
                    .take(MAX_REFERENCE_IMAGES)
                    .collect();
                images.set(selected);
            }
        })
    };

    let on_name = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let i: web_sys::HtmlInputElement = e.target_unchecked_into();
            name.set(i.value());
        })
    };

    let on_cancel = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::CloseModal))
    };

    html! {
        <div class="modal-overlay" onclick={on_cancel.clone()}>
            <div class="modal-content" onclick={|e: MouseEvent| e.stop_propagation()}>
                <div class="modal-header">
                    <h2 class="modal-title">{"New Character"}</h2>
                    <button class="close-btn" onclick={on_cancel.clone()}>{"×"}</button>
                </div>

                <div class="modal-body">
                    <div class="form-group">
                        <label class="form-label">{"Name"}</label>
                        <input class="form-input" type="text" placeholder="e.g. Captain Mira" oninput={on_name} />
                    </div>

                    <div class="form-group">
                        <label class="form-label">
                            {format!("Reference Images ({}/{})", images.len(), MAX_REFERENCE_IMAGES)}
                        </label>
                        <input class="form-input" type="file" accept="image/*" multiple=true onchange={on_files} />
                        <ul class="file-list">
                            { for images.iter().map(|file| html! { <li>{file.name()}</li> }) }
                        </ul>
                    </div>

                    if let Some(message) = &*error {
                        <div class="error-banner">{message}</div>
                    }

                    <div class="form-actions">
                        <button class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                        <button class="btn btn-primary" onclick={on_save} disabled={!can_save}>
                            {if *saving { "Saving..." } else { "Save Character" }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
