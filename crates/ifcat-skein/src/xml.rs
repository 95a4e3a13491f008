//! Canonical XML rendering of a skein.
//!
//! Document structure:
//!
//! ```text
//! <Skein rootNode="<nodeID>" xmlns="http://www.logicalshift.org.uk/IF/Skein">
//!   <generator>ifcat</generator>
//!   <activeNode nodeId="<nodeID>"/>
//!   <item nodeId="<nodeID>">
//!     <command xml:space="preserve">...</command>
//!     <result xml:space="preserve">...</result>
//!     <annotation xml:space="preserve">...</annotation>
//!     <commentary xml:space="preserve">...</commentary>
//!     <played>YES/NO</played>
//!     <changed>YES/NO</changed>
//!     <temporary score="1">YES/NO</temporary>
//!     <children>
//!       <child nodeId="<nodeID>"/>
//!     </children>
//!   </item>
//! </Skein>
//! ```
//!
//! Node ids are strings uniquely identifying a node; a node must not be a
//! child of more than one item. Items are emitted by an explicit stack walk
//! (children pushed in order, popped last-in first-out), which matches the
//! document order of existing skein files.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;
use crate::item::SkeinItem;
use crate::skein::Skein;

const SKEIN_NS: &str = "http://www.logicalshift.org.uk/IF/Skein";
const GENERATOR: &str = "ifcat";

/// Escape free text for embedding in a skein document.
///
/// Entity-escapes the five XML metacharacters, keeps newlines literally, and
/// drops the remaining control characters below space, which the parsers
/// these documents target cannot read back. Serialization-only; the inverse
/// transform belongs to the document parser.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => escaped.push('\n'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            ch if ch < ' ' => {}
            ch => escaped.push(ch),
        }
    }
    escaped
}

impl Skein {
    /// Render the whole tree as a canonical XML document.
    ///
    /// The walk is iterative over an explicit stack, so arbitrarily deep
    /// transcripts cannot overflow the call stack. A well-formed tree
    /// always serializes; a node reachable from two parents would simply
    /// be emitted twice (callers own that invariant).
    pub fn xml_data(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        let root_id = self.root().id().to_string();
        let active_id = self.active().to_string();

        let mut doc = BytesStart::new("Skein");
        doc.push_attribute(("rootNode", root_id.as_str()));
        doc.push_attribute(("xmlns", SKEIN_NS));
        writer.write_event(Event::Start(doc))?;

        writer.write_event(Event::Start(BytesStart::new("generator")))?;
        writer.write_event(Event::Text(BytesText::new(GENERATOR)))?;
        writer.write_event(Event::End(BytesEnd::new("generator")))?;

        let mut active = BytesStart::new("activeNode");
        active.push_attribute(("nodeId", active_id.as_str()));
        writer.write_event(Event::Empty(active))?;

        let mut stack: Vec<&SkeinItem> = vec![self.root()];
        while let Some(item) = stack.pop() {
            stack.extend(item.children().iter());
            write_item(&mut writer, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("Skein")))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(String::from_utf8(bytes)?)
    }
}

fn write_item(writer: &mut Writer<Vec<u8>>, item: &SkeinItem) -> Result<()> {
    let id = item.id().to_string();
    let mut start = BytesStart::new("item");
    start.push_attribute(("nodeId", id.as_str()));
    writer.write_event(Event::Start(start))?;

    for (tag, text) in [
        ("command", item.command()),
        ("result", item.result()),
        ("annotation", item.annotation()),
        ("commentary", item.commentary()),
    ] {
        let Some(text) = text else { continue };
        if text.is_empty() {
            continue;
        }
        let mut start = BytesStart::new(tag);
        start.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(start))?;
        writer.write_event(Event::Text(BytesText::from_escaped(escape_text(text))))?;
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
    }

    write_flag(writer, "played", item.played())?;
    write_flag(writer, "changed", item.changed())?;

    let score = item.temporary_score().to_string();
    let mut temporary = BytesStart::new("temporary");
    temporary.push_attribute(("score", score.as_str()));
    writer.write_event(Event::Start(temporary))?;
    writer.write_event(Event::Text(BytesText::new(yes_no(item.temporary()))))?;
    writer.write_event(Event::End(BytesEnd::new("temporary")))?;

    if !item.children().is_empty() {
        writer.write_event(Event::Start(BytesStart::new("children")))?;
        for child in item.children() {
            let child_id = child.id().to_string();
            let mut reference = BytesStart::new("child");
            reference.push_attribute(("nodeId", child_id.as_str()));
            writer.write_event(Event::Empty(reference))?;
        }
        writer.write_event(Event::End(BytesEnd::new("children")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "NO" }
}

fn write_flag(writer: &mut Writer<Vec<u8>>, tag: &str, flag: bool) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(yes_no(flag))))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
