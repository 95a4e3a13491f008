//! Story-file format detection and fingerprinting.
//!
//! Interactive-fiction files identify themselves in format-specific ways.
//! ADRIFT obfuscates its header with a Visual Basic RNG stream cipher; AGT
//! points at a description block holding a version and signature. This crate
//! derives a stable, format-tagged [`StoryId`] from a file's bytes so a
//! catalog can deduplicate stories and look up metadata without parsing the
//! whole file.
//!
//! Identification is best-effort: [`FormatRegistry::identify`] returns
//! `None` for anything unreadable or unrecognized, which is the common case
//! when scanning a directory of mixed files.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ifcat_ident::FormatRegistry;
//!
//! let registry = FormatRegistry::new();
//! match registry.identify(Path::new("cloak.taf")) {
//!     Some(id) => println!("{id}"),
//!     None => println!("not a recognized story file"),
//! }
//! ```

#![deny(unsafe_code)]

mod error;
mod hash;
mod id;
mod io;
mod registry;

pub mod adrift;
pub mod agt;
pub mod vbrng;

pub use error::{IdentError, Result};
pub use id::StoryId;
pub use registry::{AdriftFormat, AgtFormat, FormatRegistry, PROBE_LEN, StoryFormat};
pub use vbrng::VbRng;
