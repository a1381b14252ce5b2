//! Midnight Dream Storefront library.
//!
//! A storefront demo: product catalog, shopping cart, mock authentication,
//! and modal/sidebar orchestration, rendered to HTML with askama. State
//! persists through a key-value store adapter; the "network" is a pair of
//! injected asynchronous collaborators with simulated latency.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod filters;
pub mod notify;
pub mod render;
pub mod services;
pub mod storage;
pub mod ui;
