//! Skein transcripts: trees of recorded play sessions.
//!
//! A skein records every path a play session has taken through a story: one
//! [`SkeinItem`] per move, holding the typed command, the game's response,
//! and any annotations, with alternate continuations as children. The
//! [`Skein`] owns the tree, tracks the active position, and acts as the
//! interpreter's output receiver while a session is recorded.
//!
//! [`Skein::xml_data`] renders the whole tree as a canonical XML document
//! for persistence and exchange; the inverse parser lives elsewhere.
//!
//! # Example
//!
//! ```
//! use ifcat_skein::Skein;
//!
//! let mut skein = Skein::new();
//! skein.input_command("go north");
//! skein.output_text("A clearing.\n");
//! skein.waiting_for_input();
//!
//! let document = skein.xml_data().unwrap();
//! assert!(document.starts_with("<Skein rootNode="));
//! ```

#![deny(unsafe_code)]

mod error;
mod item;
mod skein;
mod xml;

pub use error::{Result, SkeinError};
pub use item::{NodeId, SkeinItem};
pub use skein::{ROOT_COMMAND, Skein};
pub use xml::escape_text;
