pub mod help;
pub mod pagetest;
