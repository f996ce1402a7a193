// ABOUTME: Library crate for cloud-onboard exposing the wizard, catalog and submission API

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod models;
pub mod submission;
