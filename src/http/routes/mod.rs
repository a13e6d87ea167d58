pub mod todos;
pub mod weather;
