use crate::api;
use crate::store::{Action, StoreContext};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct KeyModalProps {
    /// Whether the form can be closed without entering a key
    #[prop_or_default]
    pub dismissable: bool,
}

/// API key selection form.
///
/// Submitting or dismissing both report back to the server, which assumes
/// the selection succeeded. A bad key only shows up on the next generation.
#[function_component(KeyModal)]
pub fn key_modal(props: &KeyModalProps) -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let api_key = use_state(String::new);

    let submit = {
        let store = store.clone();
        Callback::from(move |candidate: Option<String>| {
            let store = store.clone();
            yew::platform::spawn_local(async move {
                match api::select_key(candidate).await {
                    Ok(status) => {
                        store.dispatch(Action::SetKeyStatus(status));
                        store.dispatch(Action::CloseModal);
                    }
                    Err(e) => tracing::error!("Failed to select API key: {}", e),
                }
            });
        })
    };

    let on_save = {
        let submit = submit.clone();
        let api_key = api_key.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            submit.emit(Some((*api_key).clone()));
        })
    };

    let on_cancel = {
        let submit = submit.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            submit.emit(None);
        })
    };

    let on_input = {
        let api_key = api_key.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            api_key.set(input.value());
        })
    };

    html! {
        <div class="modal-overlay">
            <div class="modal-content">
                <div class="modal-header">
                    <h2 class="modal-title">{"Select a Gemini API Key"}</h2>
                    if props.dismissable {
                        <button class="close-btn" onclick={on_cancel.clone()}>{"×"}</button>
                    }
                </div>

                <div class="modal-body">
                    <p class="modal-text">
                        {"Veo video generation needs a key from a Google Cloud project with billing enabled."}
                    </p>
                    if let Some(error) = &store.key_status.error {
                        <div class="error-banner">{error}</div>
                    }
                    <div class="form-group">
                        <label class="form-label">{"API Key"}</label>
                        <input type="password" class="form-input"
                            value={(*api_key).clone()}
                            oninput={on_input}
                            placeholder="AIza..."
                        />
                    </div>

                    <div class="form-actions">
                        if props.dismissable {
                            <button class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                        }
                        <button class="btn btn-primary" onclick={on_save}
                            disabled={api_key.trim().is_empty()}>
                            {"Select API Key"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
