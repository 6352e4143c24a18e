pub mod media;
pub mod photo;
pub mod template_item;
