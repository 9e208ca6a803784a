//! Element builder used by the dialect writers, emitted through quick-xml.

use std::borrow::Cow;
use std::io;
use std::time::Duration;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::writer::ReportError;

/// An element with attributes, child elements and optional text.
#[derive(Clone, Debug, Default)]
pub(crate) struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    pub(crate) fn new(name: &'static str) -> Self {
        Element {
            name,
            ..Default::default()
        }
    }

    #[must_use]
    pub(crate) fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    #[must_use]
    pub(crate) fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub(crate) fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub(crate) fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Write as an indented document with an XML declaration.
    pub(crate) fn write_document(&self, out: &mut dyn io::Write) -> Result<(), ReportError> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.write(&mut writer)?;
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    fn write<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<(), ReportError> {
        let mut start = BytesStart::new(self.name);
        for (key, value) in &self.attributes {
            start.push_attribute((*key, sanitize(value).as_ref()));
        }

        if self.text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(&sanitize(text))))?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name)))?;
        Ok(())
    }
}

/// Drop characters XML 1.0 cannot represent; escaping is left to quick-xml.
fn sanitize(raw: &str) -> Cow<'_, str> {
    let invalid = |c: char| (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r');
    if raw.chars().any(invalid) {
        Cow::Owned(raw.chars().filter(|&c| !invalid(c)).collect())
    } else {
        Cow::Borrowed(raw)
    }
}

/// Seconds with millisecond precision, the unit every dialect uses.
pub(crate) fn seconds(time: Duration) -> String {
    format!("{:.3}", time.as_secs_f64())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(element: &Element) -> String {
        let mut out = Vec::new();
        element.write_document(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sanitize_drops_control_characters() {
        assert_eq!(sanitize("a\u{1}b\tc"), "ab\tc");
        assert!(matches!(sanitize("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_escapes_attributes_and_text() {
        let doc = render(
            &Element::new("failure")
                .attr("name", "a<b & \"c\"\u{1}")
                .child(Element::new("message").text("x<y\u{7}")),
        );

        assert!(doc.contains("name=\"a&lt;b &amp; &quot;c&quot;\""), "{doc}");
        assert!(doc.contains("<message>x&lt;y</message>"), "{doc}");
        assert!(!doc.contains('\u{1}') && !doc.contains('\u{7}'));
    }

    #[test]
    fn test_render_nested() {
        let doc = render(
            &Element::new("root")
                .attr("n", 1)
                .child(Element::new("leaf").text("x"))
                .child(Element::new("empty")),
        );

        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(doc.contains("<root n=\"1\">"));
        assert!(doc.contains("\n  <leaf>x</leaf>"));
        assert!(doc.contains("\n  <empty/>"));
        assert!(doc.ends_with("</root>\n"));
    }

    #[test]
    fn test_seconds() {
        assert_eq!(seconds(Duration::from_millis(1500)), "1.500");
    }
}
