use shared::models::*;
use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct State {
    pub characters: Vec<Character>,
    /// Newest first, as listed by the server
    pub videos: Vec<GeneratedVideo>,
    pub selected_character_id: Option<Uuid>,
    pub key_status: KeyStatus,
    pub modal_open: Option<ModalType>,
}

impl State {
    pub fn selected_character(&self) -> Option<&Character> {
        let id = self.selected_character_id?;
        self.characters.iter().find(|c| c.id == id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalType {
    CreateCharacter,
    SelectKey,
}

pub enum Action {
    SetCharacters(Vec<Character>),
    AddCharacter(Character),
    RemoveCharacter(Uuid),
    /// Clicking the selected character again clears the selection
    ToggleCharacter(Uuid),
    SetVideos(Vec<GeneratedVideo>),
    UpsertVideo(GeneratedVideo),
    SetKeyStatus(KeyStatus),
    OpenModal(ModalType),
    CloseModal,
}

impl Reducible for State {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            Action::SetCharacters(chars) => {
                next.characters = chars;
            }
            Action::AddCharacter(character) => {
                next.characters.push(character);
            }
            Action::RemoveCharacter(id) => {
                next.characters.retain(|c| c.id != id);
                if next.selected_character_id == Some(id) {
                    next.selected_character_id = None;
                }
            }
            Action::ToggleCharacter(id) => {
                next.selected_character_id = if next.selected_character_id == Some(id) {
                    None
                } else {
                    Some(id)
                };
            }
            Action::SetVideos(videos) => {
                next.videos = videos;
            }
            Action::UpsertVideo(video) => {
                match next.videos.iter_mut().find(|v| v.id == video.id) {
                    Some(existing) => *existing = video,
                    None => next.videos.insert(0, video),
                }
            }
            Action::SetKeyStatus(status) => {
                next.key_status = status;
            }
            Action::OpenModal(modal_type) => {
                next.modal_open = Some(modal_type);
            }
            Action::CloseModal => {
                next.modal_open = None;
            }
        }

        next.into()
    }
}

pub type StoreContext = UseReducerHandle<State>;

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: State, action: Action) -> State {
        (*Rc::new(state).reduce(action)).clone()
    }

    fn character(name: &str) -> Character {
        Character::new(name, vec!["data:image/png;base64,AA==".to_string()])
    }

    #[test]
    fn deleting_selected_character_clears_selection() {
        let mira = character("Mira");
        let kai = character("Kai");
        let state = State {
            characters: vec![mira.clone(), kai.clone()],
            selected_character_id: Some(mira.id),
            ..Default::default()
        };

        let state = reduce(state, Action::RemoveCharacter(kai.id));
        assert_eq!(state.selected_character_id, Some(mira.id));

        let state = reduce(state, Action::RemoveCharacter(mira.id));
        assert_eq!(state.selected_character_id, None);
        assert!(state.characters.is_empty());
    }

    #[test]
    fn toggling_selection() {
        let mira = character("Mira");
        let state = State {
            characters: vec![mira.clone()],
            ..Default::default()
        };

        let state = reduce(state, Action::ToggleCharacter(mira.id));
        assert_eq!(state.selected_character().map(|c| c.name.as_str()), Some("Mira"));
        let state = reduce(state, Action::ToggleCharacter(mira.id));
        assert!(state.selected_character().is_none());
    }

    #[test]
    fn upsert_replaces_in_place_and_prepends_new_jobs() {
        let first = GeneratedVideo::pending("first", None);
        let second = GeneratedVideo::pending("second", None);
        let state = reduce(State::default(), Action::UpsertVideo(first.clone()));
        let state = reduce(state, Action::UpsertVideo(second.clone()));

        let mut done = first.clone();
        done.status = VideoStatus::Completed;
        done.url = "https://example/video1&key=k".to_string();
        let state = reduce(state, Action::UpsertVideo(done.clone()));

        assert_eq!(state.videos, vec![second, done]);
    }
}
