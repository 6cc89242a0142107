use crate::api;
use crate::store::{Action, ModalType, StoreContext};
use yew::prelude::*;

#[function_component(CharSidebar)]
pub fn char_sidebar() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    let on_select = {
        let store = store.clone();
        Callback::from(move |id: uuid::Uuid| store.dispatch(Action::ToggleCharacter(id)))
    };

    let open_create = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::OpenModal(ModalType::CreateCharacter)))
    };

    let on_delete = {
        let store = store.clone();
        Callback::from(move |id: uuid::Uuid| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this character? Videos made with it are kept.").ok())
                == Some(true);
            if !confirmed {
                return;
            }
            let store = store.clone();
            yew::platform::spawn_local(async move {
                match api::delete_character(id).await {
                    Ok(()) => store.dispatch(Action::RemoveCharacter(id)),
                    Err(e) => tracing::error!("Failed to delete character: {}", e),
                }
            });
        })
    };

    html! {
        <div class="sidebar">
            <header>
                <div class="section-label">{"Cast"}</div>
                <button class="icon-btn" onclick={open_create} title="New Character">
                    <svg viewBox="0 0 24 24"><path d="M19 13h-6v6h-2v-6H5v-2h6V5h2v6h6v2z"></path></svg>
                </button>
            </header>

            <div class="char-list">
                if store.characters.is_empty() {
                    <div class="sidebar-empty-state">
                        {"No characters yet. Add one to keep a face consistent across scenes."}
                    </div>
                }
                { for store.characters.iter().map(|char| {
                    let id = char.id;
                    let on_click = on_select.clone();
                    let on_delete_click = on_delete.clone();
                    let is_active = Some(id) == store.selected_character_id;

                    html! {
                        <div class={classes!("char-item", if is_active { "active" } else { "" })} onclick={move |_| on_click.emit(id)}>
                            if char.thumbnail.is_empty() {
                                <div class="avatar">{char.name.chars().next().unwrap_or('?')}</div>
                            } else {
                                <img class="avatar" src={char.thumbnail.clone()} alt={char.name.clone()} />
                            }
                            <div class="char-info">
                                <div class="char-name">{&char.name}</div>
                                <div class="char-desc">{format!("{} reference image(s)", char.images.len())}</div>
                            </div>
                            <button class="delete-btn" onclick={move |e: MouseEvent| { e.stop_propagation(); on_delete_click.emit(id); }} title="Delete character">
                                <svg viewBox="0 0 24 24"><path d="M6 19c0 1.1.9 2 2 2h8c1.1 0 2-.9 2-2V7H6v12zM19 4h-3.5l-1-1h-5l-1 1H5v2h14V4z"></path></svg>
                            </button>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
