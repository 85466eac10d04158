//! Scraping client for the Anitaku anime site.
//!
//! [`AnitakuClient`] wraps one HTTP session and answers four questions about the
//! site: what a search returns, a title's airing status, whether a page is the
//! site's "404 Not Found" panel, and the newest episode number of a title.

pub mod client;
pub mod config;
pub mod error;

pub use client::{AnitakuClient, DEFAULT_FILTERS, Filter, SearchResult};
pub use config::Config;
pub use error::{Error, Result};
