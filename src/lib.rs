pub mod api;
pub mod cli;
pub mod db;
pub mod inventory;
pub mod paths;
