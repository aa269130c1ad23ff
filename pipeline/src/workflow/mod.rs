pub mod config;
pub mod runner;
pub mod table;
pub mod tanks;
