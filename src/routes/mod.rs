pub mod health;
pub mod index;
