pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod project;
pub mod run;
