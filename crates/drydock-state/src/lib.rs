//! Path-addressed state plumbing for staged document editing.
//!
//! This crate provides the generic pieces the drydock engine is built on:
//!
//! - [`Path`]/[`Seg`]: typed addresses into a JSON tree, with the
//!   [`path!`] macro for literals
//! - [`get_at_path`]/[`set_at_path`]: the nested-path accessor; reads
//!   return `None` for absent nodes, writes fail loudly instead of
//!   creating missing structure
//! - [`StateCell`]: a shared mutable document
//! - [`Cursor`]: the read/swap/reset choke point every mutation funnels
//!   through, with an optional per-write hook
//!
//! # Quick Start
//!
//! ```
//! use drydock_state::{path, Cursor, Path, StateCell};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let cell = Arc::new(StateCell::new(json!({"count": 0, "features": []})));
//! let count = Cursor::new(Arc::clone(&cell), path!("count"));
//!
//! count.swap(|v| json!(v.as_i64().unwrap_or(0) + 1)).unwrap();
//! assert_eq!(count.read(), Some(json!(1)));
//! ```

mod accessor;
mod cell;
mod cursor;
mod error;
mod path;

pub use accessor::{get_at_path, set_at_path};
pub use cell::StateCell;
pub use cursor::{Cursor, WriteHook};
pub use error::{value_type_name, HookError, StateError, StateResult};
pub use path::{Path, Seg};

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
