pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod presentation;
pub mod scan;
pub mod spring;
pub mod store;
pub mod texture;
pub mod tasks {
    pub mod acquire;
    pub mod driver;
}
