// Minimal XML element tree for reading specification fragments

//! # XML Elements
//!
//! Specification documents are read into a small owned tree of
//! [`XmlElement`]s. Only what the privilege decoder needs is kept: local
//! element names (namespace prefixes dropped), attributes, text content and
//! children. Comments, processing instructions and the XML declaration are
//! skipped.
//!
//! Matching on local names means that `<yawl:privileges>` and a
//! `<privileges>` under a default namespace both decode the same way.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{PrivilegeError, Result};

/// One element of a parsed XML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create a detached element, mostly useful for building trees by hand
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Parse a document and return its root element
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        PrivilegeError::MalformedXml("closing tag without opening tag".to_string())
                    })?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(PrivilegeError::MalformedXml(format!("element <{}> is never closed", open.name)));
        }
        root.ok_or_else(|| PrivilegeError::MalformedXml("document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut element = XmlElement::new(String::from_utf8_lossy(start.local_name().as_ref()));
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let name = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            element.attributes.push((name, value));
        }
        Ok(element)
    }

    fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => {
                return Err(PrivilegeError::MalformedXml(format!(
                    "second root element <{}>",
                    element.name
                )))
            }
        }
        Ok(())
    }

    /// Local name of the element
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text content, trimmed
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn children(&self) -> impl Iterator<Item = &XmlElement> + '_ {
        self.children.iter()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Trimmed text of the first child with this name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlElement::text)
    }

    /// First element with this name in document order, this element included
    pub fn find_first(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_first(name))
    }

    /// Every element with this name in document order, this element included
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_named(name, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let root = XmlElement::parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <!-- leading comment -->
            <task id="t1">
                <name>Review</name>
                <flags><urgent/></flags>
            </task>"#,
        )
        .unwrap();

        assert_eq!(root.name(), "task");
        assert_eq!(root.attribute("id"), Some("t1"));
        assert_eq!(root.child_text("name"), Some("Review"));
        assert!(root.child("flags").and_then(|f| f.child("urgent")).is_some());
        assert_eq!(root.children().count(), 2);
    }

    #[test]
    fn test_namespace_prefixes_are_dropped() {
        let root = XmlElement::parse(
            r#"<y:spec xmlns:y="http://www.yawlfoundation.org/yawlschema"><y:task y:id="a"/></y:spec>"#,
        )
        .unwrap();

        assert_eq!(root.name(), "spec");
        let task = root.child("task").unwrap();
        assert_eq!(task.attribute("id"), Some("a"));
    }

    #[test]
    fn test_text_is_unescaped_and_trimmed() {
        let root = XmlElement::parse("<p>\n  R&amp;D  </p>").unwrap();
        assert_eq!(root.text(), "R&D");

        let root = XmlElement::parse("<q><![CDATA[<team>]]></q>").unwrap();
        assert_eq!(root.text(), "<team>");
    }

    #[test]
    fn test_find_first_and_find_all() {
        let root = XmlElement::parse("<a><b><c>1</c></b><c>2</c></a>").unwrap();

        assert_eq!(root.find_first("c").map(XmlElement::text), Some("1"));
        let texts: Vec<&str> = root.find_all("c").into_iter().map(XmlElement::text).collect();
        assert_eq!(texts, vec!["1", "2"]);
        assert!(root.find_first("z").is_none());
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert!(XmlElement::parse("").is_err());
        assert!(XmlElement::parse("<a><b></a>").is_err());
        assert!(XmlElement::parse("<a>").is_err());
        assert!(XmlElement::parse("<a/><b/>").is_err());
    }
}
