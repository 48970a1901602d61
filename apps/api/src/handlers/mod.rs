pub mod collaboration;
pub mod health;
pub mod projects;
pub mod search;
pub mod tasks;
pub mod users;
