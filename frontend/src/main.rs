mod api;
mod components;
mod store;

use components::char_modal::CharModal;
use components::gallery::Gallery;
use components::key_modal::KeyModal;
use components::prompt_bar::{PromptBar, track_job};
use components::sidebar::CharSidebar;
use store::{Action, ModalType, State, StoreContext};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(State::default);

    // Load session, cast and gallery on mount
    {
        let store = store.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                match api::fetch_session().await {
                    Ok(status) => store.dispatch(Action::SetKeyStatus(status)),
                    Err(e) => tracing::error!("Failed to check API key: {}", e),
                }
                if let Ok(chars) = api::fetch_characters().await {
                    store.dispatch(Action::SetCharacters(chars));
                }
                if let Ok(videos) = api::fetch_videos().await {
                    for video in videos.iter().filter(|v| v.is_pending()) {
                        track_job(store.clone(), video.id);
                    }
                    store.dispatch(Action::SetVideos(videos));
                }
            });
            || {}
        });
    }

    let change_key = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::OpenModal(ModalType::SelectKey)))
    };

    let status = &store.key_status;

    html! {
        <ContextProvider<StoreContext> context={store.clone()}>
            if status.checking {
                <div class="loading-screen">{"Checking API key..."}</div>
            } else if !status.has_key {
                <KeyModal />
            } else {
                <div class="app-container">
                    <header class="app-header">
                        <h1 class="app-title">{"Lumiere Studio"}</h1>
                        <button class="btn btn-secondary" onclick={change_key}>{"Change API Key"}</button>
                    </header>
                    <div class="sidebar-container">
                        <CharSidebar />
                    </div>
                    <div class="main-stage">
                        <PromptBar />
                        <Gallery />
                    </div>

                    if let Some(modal) = &store.modal_open {
                        if *modal == ModalType::SelectKey {
                            <KeyModal dismissable=true />
                        } else {
                            <CharModal />
                        }
                    }
                </div>
            }
        </ContextProvider<StoreContext>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
