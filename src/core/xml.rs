//! A small owned XML tree, enough to walk feeds and API responses.

use crate::utils::error::{RecipeError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::map::Entry;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    fn open(start: &BytesStart) -> Result<Self> {
        let mut node = XmlNode {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            ..Default::default()
        };
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            node.attributes.push((
                String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                attr.unescape_value()?.into_owned(),
            ));
        }
        Ok(node)
    }

    /// Parses a document and returns its root element.
    pub fn parse(text: &str) -> Result<XmlNode> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(XmlNode::open(&start)?),
                Event::Empty(start) => {
                    let node = XmlNode::open(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => root = Some(node),
                    }
                }
                Event::End(_) => {
                    if let Some(node) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(node),
                            None => root = Some(node),
                        }
                    }
                }
                Event::Text(text) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(RecipeError::DecodeError {
                message: format!("unclosed element <{}>", open.name),
            });
        }
        root.ok_or_else(|| RecipeError::DecodeError {
            message: "document has no root element".to_string(),
        })
    }

    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// JSON view of the element. Leaves without attributes become plain
    /// strings; otherwise attributes go under `@attributes`, repeated child
    /// names collect into arrays, and text sits under `#text`.
    pub fn to_value(&self) -> Value {
        if self.attributes.is_empty() && self.children.is_empty() {
            return Value::String(self.text.clone());
        }

        let mut map = Map::new();
        if !self.attributes.is_empty() {
            let attrs: Map<String, Value> = self
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            map.insert("@attributes".to_string(), Value::Object(attrs));
        }

        for child in &self.children {
            let value = child.to_value();
            match map.entry(child.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => match slot.get_mut() {
                    Value::Array(items) => items.push(value),
                    existing => {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                    }
                },
            }
        }

        if !self.text.is_empty() {
            map.insert("#text".to_string(), Value::String(self.text.clone()));
        }
        Value::Object(map)
    }
}
