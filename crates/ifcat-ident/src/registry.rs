//! Format capability registry.
//!
//! Each supported story-file format contributes a pair of capabilities: a
//! cheap header probe and an identifier extractor. The registry probes
//! formats in registration order and is the best-effort entry point used by
//! directory scans, where most files will not match any format.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::id::StoryId;
use crate::io::read_prefix;
use crate::{adrift, agt};

/// Longest header prefix any registered probe needs.
pub const PROBE_LEN: usize = agt::HEADER_LEN;

/// One supported story-file format.
pub trait StoryFormat {
    /// Short format tag; also the identifier prefix.
    fn name(&self) -> &'static str;

    /// File extensions conventionally used by the format.
    fn extensions(&self) -> &'static [&'static str];

    /// Claim check over the file's header prefix.
    fn detect(&self, header: &[u8]) -> bool;

    /// Extract the story identifier from the file at `path`.
    fn story_id(&self, path: &Path) -> Result<StoryId>;
}

/// ADRIFT capability pair.
pub struct AdriftFormat;

impl StoryFormat for AdriftFormat {
    fn name(&self) -> &'static str {
        "ADRIFT"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["taf"]
    }

    fn detect(&self, header: &[u8]) -> bool {
        adrift::is_adrift(header)
    }

    fn story_id(&self, path: &Path) -> Result<StoryId> {
        adrift::story_id(path)
    }
}

/// AGT capability pair.
pub struct AgtFormat;

impl StoryFormat for AgtFormat {
    fn name(&self) -> &'static str {
        "AGT"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["agx", "agt"]
    }

    fn detect(&self, header: &[u8]) -> bool {
        agt::is_agt(header)
    }

    fn story_id(&self, path: &Path) -> Result<StoryId> {
        agt::story_id(path)
    }
}

/// Ordered collection of format capabilities.
pub struct FormatRegistry {
    formats: Vec<Box<dyn StoryFormat>>,
}

impl FormatRegistry {
    /// Registry with every built-in format.
    pub fn new() -> Self {
        Self {
            formats: vec![Box::new(AdriftFormat), Box::new(AgtFormat)],
        }
    }

    /// Register an additional format capability. Probing order follows
    /// registration order.
    pub fn register(&mut self, format: Box<dyn StoryFormat>) {
        self.formats.push(format);
    }

    /// The registered formats, in probing order.
    pub fn formats(&self) -> impl Iterator<Item = &dyn StoryFormat> {
        self.formats.iter().map(|format| &**format)
    }

    /// Identify the story file at `path`, best-effort.
    ///
    /// Reads a single header prefix and runs the claiming format's
    /// extractor. Unreadable files, unclaimed headers, and extraction
    /// failures all yield `None`; the cause is logged at debug level.
    pub fn identify(&self, path: &Path) -> Option<StoryId> {
        let header = match read_prefix(path, PROBE_LEN) {
            Ok(header) => header,
            Err(error) => {
                debug!(path = %path.display(), %error, "header unreadable");
                return None;
            }
        };
        for format in self.formats() {
            if !format.detect(&header) {
                continue;
            }
            match format.story_id(path) {
                Ok(id) => return Some(id),
                Err(error) => {
                    debug!(
                        path = %path.display(),
                        format = format.name(),
                        %error,
                        "identifier extraction failed"
                    );
                }
            }
        }
        None
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_formats_in_order() {
        let registry = FormatRegistry::new();
        let names: Vec<&str> = registry.formats().map(StoryFormat::name).collect();
        assert_eq!(names, ["ADRIFT", "AGT"]);
    }

    #[test]
    fn detection_is_mutually_exclusive_on_magic() {
        let mut agx = [0u8; PROBE_LEN];
        agx[..4].copy_from_slice(&agt::AGX_MAGIC);
        let registry = FormatRegistry::new();
        let claims: Vec<&str> = registry
            .formats()
            .filter(|format| format.detect(&agx))
            .map(StoryFormat::name)
            .collect();
        assert_eq!(claims, ["AGT"]);
    }

    #[test]
    fn missing_file_yields_none() {
        let registry = FormatRegistry::new();
        assert!(
            registry
                .identify(Path::new("/nonexistent/story.taf"))
                .is_none()
        );
    }
}
