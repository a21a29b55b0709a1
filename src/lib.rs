//! Taskdesk - A terminal client for a task and notes server
//!
//! This library provides a terminal-based interface for managing tasks,
//! workspaces and workspace notes stored on a remote server. All state lives
//! on the server; the client fetches it over a small JSON REST API and keeps
//! only view state (filter, sort, selection, open forms) locally.
//!
//! # Modules
//!
//! * [`backend`] - REST API client and the backend abstraction
//! * [`config`] - Application configuration management
//! * [`controller`] - Task list, notes and workspace controllers
//! * [`entities`] - Data models exchanged with the server
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Utility functions and helpers

/// Backend abstraction and the HTTP implementation
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// View-independent controllers driving the task list, notes and workspaces
pub mod controller;

/// Data models for tasks, notes and workspaces
pub mod entities;

/// Logging setup and the in-app log buffer
pub mod logger;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling
pub mod utils;

pub use entities::{Note, Task, TaskStatus, Workspace};
