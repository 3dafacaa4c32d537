//! # Otpass Architecture
//!
//! Otpass turns a sloppy name like `gihtub` into a one-time password for the right
//! account. The directory of providers, accounts and secrets arrives on standard
//! input; nothing is stored.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, reads stdin, prints the result         │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Validates the lookup, owns directory + clipboard         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - resolve: provider query, then account query or default   │
//! │  - generate: code + optional clipboard copy                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs, directory.rs, fuzzy.rs, otp.rs)           │
//! │  - Searchable providers and accounts, the fixed fuzzy       │
//! │    metric, directory loading, TOTP                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Resolution
//!
//! Providers and accounts are both [`model::Searchable`]: each carries an alias set
//! (its name, a sanitized form of it, and for providers an optional configured
//! alias) and scores a query against its best alias. A candidate must score above
//! 55 to match, and the earliest candidate wins ties, so directory order is part of
//! the lookup's meaning.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Resolution and code generation
//! - [`directory`]: Loading the provider directory
//! - [`model`]: `Searchable`, `Provider`, `Account`
//! - [`fuzzy`]: The similarity metric
//! - [`otp`]: TOTP generation
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod fuzzy;
pub mod model;
pub mod otp;
