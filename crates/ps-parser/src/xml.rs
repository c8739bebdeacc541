//! Owned, namespace-resolved XML element tree built from quick-xml events

use crate::error::{ParseError, ParseResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// Namespace of every showplan element
pub const SHOWPLAN_NAMESPACE: &str = "http://schemas.microsoft.com/sqlserver/2004/07/showplan";

/// An XML element with its resolved namespace, attributes and child elements.
///
/// Text content is dropped; showplan documents carry everything in
/// attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Resolved namespace URI, if the element is bound to one
    pub namespace: Option<String>,
    /// Local name (prefix stripped)
    pub name: String,
    /// Attributes in document order, namespace declarations excluded
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Parse a complete document and return its root element
    pub fn parse_str(xml: &str) -> ParseResult<Element> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (resolved, event) = reader
                .read_resolved_event()
                .map_err(|e| ParseError::Xml(e.to_string()))?;
            let namespace = namespace_uri(&resolved)?;
            match event {
                Event::Start(start) => {
                    stack.push(Element::from_start(namespace, &start)?);
                }
                Event::Empty(start) => {
                    let element = Element::from_start(namespace, &start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        ParseError::Xml("closing tag without a matching opening tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ParseError::Xml(format!(
                "unexpected end of document inside <{}>",
                open.name
            )));
        }
        root.ok_or_else(|| ParseError::Xml("document has no root element".to_string()))
    }

    fn from_start(namespace: Option<String>, start: &BytesStart<'_>) -> ParseResult<Element> {
        let name = utf8(start.local_name().as_ref())?;
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ParseError::Xml(e.to_string()))?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let value = attr
                .unescape_value()
                .map_err(|e| ParseError::Xml(e.to_string()))?;
            attributes.push((utf8(attr.key.local_name().as_ref())?, value.into_owned()));
        }
        Ok(Element {
            namespace,
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Whether this is the showplan element with the given local name
    pub fn is(&self, name: &str) -> bool {
        self.name == name && self.in_showplan_namespace()
    }

    /// Whether this element belongs to the showplan namespace
    pub fn in_showplan_namespace(&self) -> bool {
        self.namespace.as_deref() == Some(SHOWPLAN_NAMESPACE)
    }

    /// Attribute value by local name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First showplan child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(name))
    }

    /// All showplan children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.is(name))
    }

    /// All elements reached by following `path` one level per segment
    pub fn find_all(&self, path: &[&str]) -> Vec<&Element> {
        match path.split_first() {
            None => vec![self],
            Some((first, rest)) => self
                .children
                .iter()
                .filter(|c| c.is(first))
                .flat_map(|c| c.find_all(rest))
                .collect(),
        }
    }

    /// First element reached by following `path`, in document order
    pub fn find(&self, path: &[&str]) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// First showplan descendant (excluding self) with the given name, in
    /// document order
    pub fn descendant(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find_map(|c| if c.is(name) { Some(c) } else { c.descendant(name) })
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> ParseResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(ParseError::Xml(format!(
            "second root element <{}>",
            element.name
        ))),
    }
}

fn namespace_uri(resolved: &ResolveResult<'_>) -> ParseResult<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(utf8(ns.0)?)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::Xml(format!(
            "undeclared namespace prefix '{}'",
            String::from_utf8_lossy(prefix)
        ))),
    }
}

fn utf8(bytes: &[u8]) -> ParseResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ParseError::Xml(e.to_string()))
}

#[cfg(test)]
#[path = "xml_test.rs"]
mod tests;
