//! Client for the pdfcutter PDF web service.
//!
//! The service does all PDF work. This crate tracks what the user picked
//! (pages to extract, a new page order, files to merge or split), checks it
//! locally, and turns it into requests. [`session::Session`] ties a
//! [`tracker::Tracker`] to a [`service::PdfService`] and a set of
//! [`render::Hooks`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod consent;
pub mod contact;
pub mod document;
pub mod error;
pub mod mcp;
pub mod merge;
pub mod page_range;
pub mod render;
pub mod service;
pub mod session;
pub mod split;
pub mod tracker;

pub use error::{Error, Result};
