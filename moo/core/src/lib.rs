//! Moo Core - The cowsay rendering engine
//!
//! This crate turns a message plus a handful of face/action/wrap options into
//! the familiar speech balloon and ASCII cow. It has no knowledge of terminals,
//! HTTP servers or web pages: every surface (CLI, API handler, web form) hands
//! it loosely typed options and displays the returned string verbatim.
//!
//! # Pipeline
//!
//! ```text
//!  RenderOptions ──normalize──▶ NormalizedOptions
//!                                     │
//!        ┌────────────────────────────┼──────────────────────────┐
//!        │                            │                          │
//!   ModeCatalog                 balloon::split              CowCatalog
//!  (mode ⇄ face)             (message ─▶ lines)         (name ─▶ template)
//!        │                            │                          │
//!        │                  balloon::render_balloon              │
//!        │                            │                          │
//!        └──────────────▶  balloon + "\n" + body  ◀──────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use moo_core::{render, Action, RenderOptions};
//!
//! let cow = render("moo!", &RenderOptions::new().wrap_column(40));
//! assert!(cow.starts_with(" ______\n< moo! >"));
//!
//! let thinking = render("hmm", &RenderOptions::new().action(Action::Think).mode("dead"));
//! ```
//!
//! # Module Overview
//!
//! - [`modes`]: Face presets and the two-way mode/face lookup
//! - [`balloon`]: Message wrapping and balloon drawing
//! - [`cows`]: Character template catalog
//! - [`compose`]: Option normalization and the full render pipeline
//! - [`api`]: Loose request parameters (query strings, JSON bodies) to render calls
//! - [`share`]: Share links for a cow state
//! - [`config`]: TOML configuration file support

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod balloon;
pub mod compose;
pub mod config;
pub mod cows;
pub mod modes;
pub mod share;

// Re-exports for convenience
pub use api::{
    handle, params_from_body, params_from_query, parse_params, ApiRequest, ApiResponse, Params,
};
pub use balloon::{render_balloon, split, Action, Wrap};
pub use compose::{
    cowsay, cowthink, normalize, render, Composer, NormalizedOptions, RenderOptions, WrapOption,
    DEFAULT_WRAP,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, ConfigError,
    ConfigOverrides, ConfigSource, MooConfig, MooToml,
};
pub use cows::{CatalogError, CowCatalog, CowTemplate};
pub use modes::{face_for_mode, mode_for_face, Face, Mode, ModeCatalog, ModeId};
pub use share::{CowState, ShareData, ShareLinks, ShareWrap};
