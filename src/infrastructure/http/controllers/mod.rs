pub mod authors;
pub mod fortunes;
pub mod health;
pub mod tags;
