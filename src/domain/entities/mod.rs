pub mod shortcuts;
pub mod table;
