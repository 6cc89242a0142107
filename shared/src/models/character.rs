use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of reference images a character carries.
pub const MAX_REFERENCE_IMAGES: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    /// Data URLs (`data:image/png;base64,...`), at most [`MAX_REFERENCE_IMAGES`]
    pub images: Vec<String>,
    /// First image, or empty when the character has none
    #[serde(default)]
    pub thumbnail: String,
}

impl Character {
    /// Create a character with a fresh id, keeping only the first three images
    pub fn new(name: impl Into<String>, mut images: Vec<String>) -> Self {
        images.truncate(MAX_REFERENCE_IMAGES);
        let thumbnail = images.first().cloned().unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            images,
            thumbnail,
        }
    }

    pub fn has_references(&self) -> bool {
        !self.images.is_empty()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub images: Vec<String>,
}

impl CreateCharacterRequest {
    /// A character needs a non-blank name and at least one image.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(n: u8) -> String {
        format!("data:image/png;base64,AAA{n}")
    }

    #[test]
    fn keeps_only_first_three_images() {
        let character = Character::new("Mira", (1..=4).map(image).collect());

        assert_eq!(character.images.len(), MAX_REFERENCE_IMAGES);
        assert_eq!(character.images, vec![image(1), image(2), image(3)]);
        assert_eq!(character.thumbnail, image(1));
    }

    #[test]
    fn thumbnail_is_empty_without_images() {
        let character = Character::new("Nobody", Vec::new());

        assert!(character.thumbnail.is_empty());
        assert!(!character.has_references());
    }

    #[test]
    fn request_requires_name_and_image() {
        let mut req = CreateCharacterRequest {
            name: "   ".to_string(),
            images: vec![image(1)],
        };
        assert!(!req.is_complete());

        req.name = "Mira".to_string();
        assert!(req.is_complete());

        req.images.clear();
        assert!(!req.is_complete());
    }
}
