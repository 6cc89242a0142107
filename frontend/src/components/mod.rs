pub mod char_modal;
pub mod gallery;
pub mod key_modal;
pub mod prompt_bar;
pub mod sidebar;
