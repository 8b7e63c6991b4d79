//! MyLinks - a self-hosted link-in-bio page service
//!
//! This library provides the core functionality for the MyLinks service:
//! public page rendering, link scheduling, appearance resolution, click/view
//! tracking and analytics aggregation.
//!
//! # Architecture
//! - `core`: pure domain logic (visibility, theme resolution, page assembly,
//!   analytics aggregation)
//! - `storage`: SeaORM storage backend and data access
//! - `analytics`: buffered view/click counters and event retention
//! - `services`: business logic shared by all HTTP endpoints
//! - `api`: actix-web services and middleware
//! - `config`: configuration management
//! - `system`: logging and platform utilities

pub mod analytics;
pub mod api;
pub mod config;
pub mod core;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
