//! # Petstore Backend
//!
//! A small REST service exposing create, read and delete operations over a
//! single pet resource stored in a relational table.
//!
//! ## Architecture
//!
//! The crate is organized into three layers plus shared types:
//!
//! - [`api`]: Domain types shared across layers (pets, query conditions, sentinel errors)
//! - [`db`]: Repository trait, SQLite and in-memory implementations, factory
//! - [`services`]: Usecase layer; validation and error collapsing
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`config`]: TOML/environment configuration for the server binary

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
