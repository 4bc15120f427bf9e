pub mod interfaces;
pub mod models;
pub mod orchestrators;
pub mod prompt_composer;
pub mod region_capturer;
