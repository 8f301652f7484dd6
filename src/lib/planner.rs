//! Client side of the inspection scheduling system: cascading pickers, document
//! validation, list filtering and the page flows built on top of them.
pub mod add_term;
pub mod cascade;
pub mod documents;
pub mod error;
pub mod helpers;
pub mod inspection_service;
pub mod list_view;
pub mod manage_terms;
pub mod models;
pub mod popup;
pub mod run_tool;
pub mod schedule;
pub mod surface;
pub mod teams;
pub mod terminal;
pub mod validation;
