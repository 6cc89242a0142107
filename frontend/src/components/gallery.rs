use crate::store::StoreContext;
use shared::models::{GeneratedVideo, VideoStatus};
use yew::prelude::*;

fn download_name(video: &GeneratedVideo) -> String {
    format!("lumiere-scene-{}.mp4", video.id)
}

#[function_component(Gallery)]
pub fn gallery() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    if store.videos.is_empty() {
        return html! {
            <div class="gallery-empty-state">
                {"Your scenes will appear here."}
            </div>
        };
    }

    html! {
        <div class="gallery">
            { for store.videos.iter().map(|video| {
                let tag = video.character_label(&store.characters);
                let body = match video.status {
                    VideoStatus::Pending => html! {
                        <div class="video-placeholder">
                            <div class="spinner"></div>
                            <span>{"Generating..."}</span>
                        </div>
                    },
                    VideoStatus::Failed => html! {
                        <div class="video-placeholder failed">
                            {video.error.clone().unwrap_or_else(|| "Generation failed".to_string())}
                        </div>
                    },
                    VideoStatus::Completed => html! {
                        <video class="video-player" src={video.url.clone()} controls=true loop=true />
                    },
                };

                html! {
                    <div class="video-card" key={video.id.to_string()}>
                        {body}
                        <div class="video-meta">
                            <p class="video-prompt">{&video.prompt}</p>
                            <div class="video-footer">
                                if let Some(name) = tag {
                                    <span class="badge">{name}</span>
                                }
                                <span class="video-time">{video.created_at.format("%H:%M").to_string()}</span>
                                if video.status == VideoStatus::Completed {
                                    <a class="btn btn-secondary" href={video.url.clone()} download={download_name(video)}>
                                        {"Download"}
                                    </a>
                                }
                            </div>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
