pub mod config;
pub mod headless;
pub mod run;
pub mod script;
