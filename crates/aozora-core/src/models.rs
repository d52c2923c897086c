pub mod mapping;
pub mod media;
pub mod view;
