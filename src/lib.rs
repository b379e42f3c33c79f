//! Mood-based movie recommendations.
//!
//! A face photo is classified into one of seven emotions by an external analysis
//! service, the emotion picks a genre listing, and a random handful of titles
//! scraped from that listing is returned.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
