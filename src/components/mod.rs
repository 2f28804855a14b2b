pub mod help;
pub mod multiline;
