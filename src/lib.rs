//! SessionVault — tab-session capture, backup, and recovery for browser windows.
//!
//! Periodically snapshots every open window's tabs into a staging area,
//! promotes staged snapshots into durable sessions when a window closes or
//! when the browser cold-starts, and exposes CRUD over the resulting
//! session backlog. The hosting browser and the persistence layer are
//! external collaborators behind the [`host`] and [`storage`] seams.

pub mod app;
pub mod config;
pub mod database;
pub mod host;
pub mod managers;
pub mod services;
pub mod storage;
pub mod types;
