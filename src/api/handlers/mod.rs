pub mod health;
pub mod sorter;
