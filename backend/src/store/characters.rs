use super::{StoreError, StoreResult};
use shared::models::{Character, CreateCharacterRequest};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct CharacterStore {
    characters: RwLock<Vec<Character>>,
}

impl CharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Character> {
        self.characters.read().await.clone()
    }

    pub async fn get(&self, character_id: Uuid) -> StoreResult<Character> {
        self.characters
            .read()
            .await
            .iter()
            .find(|c| c.id == character_id)
            .cloned()
            .ok_or(StoreError::NotFound(character_id))
    }

    /// Create a character; images past the third are dropped.
    pub async fn create(&self, request: CreateCharacterRequest) -> StoreResult<Character> {
        if !request.is_complete() {
            return Err(StoreError::Invalid(
                "a character needs a name and at least one reference image",
            ));
        }

        let character = Character::new(request.name, request.images);
        self.characters.write().await.push(character.clone());
        Ok(character)
    }

    /// Remove a character. Jobs that reference it are left untouched.
    pub async fn delete(&self, character_id: Uuid) -> StoreResult<Character> {
        let mut characters = self.characters.write().await;
        let index = characters
            .iter()
            .position(|c| c.id == character_id)
            .ok_or(StoreError::NotFound(character_id))?;
        Ok(characters.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, images: usize) -> CreateCharacterRequest {
        CreateCharacterRequest {
            name: name.to_string(),
            images: (0..images)
                .map(|i| format!("data:image/png;base64,AA{i}="))
                .collect(),
        }
    }

    #[tokio::test]
    async fn create_truncates_to_three_images() {
        let store = CharacterStore::new();

        let character = store.create(request("Mira", 4)).await.unwrap();

        assert_eq!(character.images.len(), 3);
        assert_eq!(character.images[2], "data:image/png;base64,AA2=");
        assert_eq!(store.list().await, vec![character]);
    }

    #[tokio::test]
    async fn create_rejects_missing_name_or_images() {
        let store = CharacterStore::new();

        assert!(matches!(
            store.create(request("  ", 1)).await,
            Err(StoreError::Invalid(_))
        ));
        assert!(matches!(
            store.create(request("Mira", 0)).await,
            Err(StoreError::Invalid(_))
        ));
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = CharacterStore::new();

        let a = store.create(request("A", 1)).await.unwrap();
        let b = store.create(request("A", 1)).await.unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn delete_removes_and_then_reports_not_found() {
        let store = CharacterStore::new();
        let keep = store.create(request("Keep", 1)).await.unwrap();
        let gone = store.create(request("Gone", 1)).await.unwrap();

        assert_eq!(store.delete(gone.id).await.unwrap().name, "Gone");
        assert_eq!(store.delete(gone.id).await, Err(StoreError::NotFound(gone.id)));
        assert_eq!(store.get(gone.id).await, Err(StoreError::NotFound(gone.id)));
        assert_eq!(store.list().await, vec![keep]);
    }
}
