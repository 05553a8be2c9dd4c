pub mod health;
pub mod realm;
pub mod upstream;
