pub mod assign;
pub mod cluster;
pub mod extract;
pub mod source;
