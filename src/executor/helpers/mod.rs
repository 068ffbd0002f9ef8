pub mod capture;
pub mod command;
pub mod env;
pub mod working_dir;
