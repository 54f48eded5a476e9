pub mod common;
pub mod config;
pub mod history;
pub mod profile;
pub mod run;
pub mod simulate;
pub mod stats;
