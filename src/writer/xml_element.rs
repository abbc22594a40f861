use crate::{WriterConfig, XmlBifError, XmlEncoding};
use std::io::Write;
use xml::common::XmlVersion;
use xml::writer::{EmitterConfig, EventWriter, Result as EmitterResult, XmlEvent};

const INDENT: &str = "  ";

/// A minimal XML element tree: a tag with attributes and either text or child elements.
///
/// The tree does not store any formatting whitespace. Indentation and escaping are
/// decided only when the tree is serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        XmlElement {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Create a leaf element with the given text content.
    #[must_use]
    pub fn with_text(tag: &str, text: &str) -> Self {
        XmlElement {
            tag: tag.to_string(),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a child element and return a reference to it.
    pub fn push(&mut self, child: XmlElement) -> &mut XmlElement {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [XmlElement] {
        &mut self.children
    }

    /// First direct child with the given tag.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|it| it.tag == tag)
    }

    /// All direct children with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |it| it.tag == tag)
    }

    /// Serialize this element as a complete document.
    ///
    /// The document is emitted through an `xml-rs` event writer. With pretty printing,
    /// every child element starts on a new line indented by two spaces per nesting level,
    /// leaf elements keep their text inline, and the document ends with a newline.
    /// Otherwise, no whitespace is added.
    pub fn to_document_string(&self, config: &WriterConfig) -> Result<String, XmlBifError> {
        let mut writer = EmitterConfig::new()
            .perform_indent(config.pretty_print)
            .indent_string(INDENT)
            .pad_self_closing(false)
            .write_document_declaration(false)
            .create_writer(Vec::new());
        if config.xml_declaration {
            writer
                .write(XmlEvent::StartDocument {
                    version: XmlVersion::Version10,
                    encoding: Some(config.encoding.name()),
                    standalone: None,
                })
                .map_err(|e| XmlBifError::Emit(e.to_string()))?;
        }
        write_element(&mut writer, self).map_err(|e| XmlBifError::Emit(e.to_string()))?;

        let mut document = String::from_utf8(writer.into_inner())
            .map_err(|e| XmlBifError::Emit(e.to_string()))?;
        if config.pretty_print {
            document.push('\n');
        }
        Ok(match config.encoding {
            XmlEncoding::Utf8 => document,
            XmlEncoding::Ascii => to_character_references(&document),
        })
    }
}

/// Emit one element with all its descendants.
fn write_element<W: Write>(
    writer: &mut EventWriter<W>,
    element: &XmlElement,
) -> EmitterResult<()> {
    let mut start = XmlEvent::start_element(element.tag.as_str());
    for (name, value) in &element.attributes {
        start = start.attr(name.as_str(), value.as_str());
    }
    writer.write(start)?;
    if let Some(text) = &element.text {
        writer.write(XmlEvent::characters(text))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write(XmlEvent::end_element())
}

/// Replace every non-ASCII character with a numeric character reference.
///
/// XMLBIF tags and attribute names are ASCII, so only text and attribute values change.
fn to_character_references(document: &str) -> String {
    let mut out = String::with_capacity(document.len());
    for c in document.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("&#{};", u32::from(c)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::{WriterConfig, XmlElement, XmlEncoding};

    fn sample() -> XmlElement {
        let mut root = XmlElement::new("A").with_attribute("k", "v");
        let b = root.push(XmlElement::new("B"));
        b.push(XmlElement::with_text("C", "x"));
        b.push(XmlElement::new("D"));
        root.push(XmlElement::with_text("E", ""));
        root
    }

    #[test]
    fn pretty_print_indents_nested_elements() {
        let expected = "<A k=\"v\">\n  <B>\n    <C>x</C>\n    <D/>\n  </B>\n  <E></E>\n</A>\n";
        assert_eq!(sample().to_document_string(&WriterConfig::default()).unwrap(), expected);
    }

    #[test]
    fn compact_output_has_no_whitespace() {
        let expected = "<A k=\"v\"><B><C>x</C><D/></B><E></E></A>";
        assert_eq!(sample().to_document_string(&WriterConfig::compact()).unwrap(), expected);
    }

    #[test]
    fn special_characters_are_escaped() {
        let element = XmlElement::with_text("N", "a < b & c").with_attribute("q", "\"x\"");
        let text = element.to_document_string(&WriterConfig::compact()).unwrap();
        assert!(text.contains("a &lt; b &amp; c"));
        assert!(!text.contains("\"x\""));
    }

    #[test]
    fn ascii_output_uses_character_references() {
        let config = WriterConfig {
            encoding: XmlEncoding::Ascii,
            pretty_print: false,
            xml_declaration: true,
        };
        let text = XmlElement::with_text("N", "mo\u{17e}no")
            .to_document_string(&config)
            .unwrap();
        assert_eq!(
            text,
            "<?xml version=\"1.0\" encoding=\"US-ASCII\"?><N>mo&#382;no</N>"
        );
        assert!(text.is_ascii());
    }

    #[test]
    fn lookup_helpers() {
        let root = sample();
        assert_eq!(root.attribute("k"), Some("v"));
        assert_eq!(root.attribute("z"), None);
        let b = root.find("B").unwrap();
        assert_eq!(b.find_all("C").count(), 1);
        assert_eq!(b.find("C").and_then(|it| it.text()), Some("x"));
        assert!(root.find("C").is_none());
    }
}
