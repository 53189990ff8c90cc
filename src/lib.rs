pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod recipes;
pub mod state;
pub mod telemetry;
pub mod web;
