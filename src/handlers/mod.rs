pub mod files;
pub mod frontend;
pub mod health;
pub mod photos;
pub mod thumbnail;
