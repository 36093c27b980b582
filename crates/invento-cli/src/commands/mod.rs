pub mod bounds;
pub mod config;
pub mod run;
