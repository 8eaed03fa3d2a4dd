//! XML documents, read and written with quick-xml.
//!
//! Namespace prefixes are dropped from element and attribute names and
//! namespace declarations are ignored, so `<isdoc:Invoice xmlns:isdoc="…">`
//! reads as an `Invoice` element without attributes.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::SourceError;
use crate::{
    constants::MAX_DOCUMENT_NESTING,
    data::{Data, Element, Raw},
};

/// Parses an XML document.
pub fn parse(text: &str) -> Result<Data, SourceError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                check_nesting(&stack)?;
                stack.push(open(&start)?);
            }
            Event::Empty(start) => {
                check_nesting(&stack)?;
                let element = open(&start)?;
                close(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| SourceError::Malformed {
                    reason: "unexpected closing tag".to_string(),
                    path: "/".to_string(),
                })?;
                close(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => append_text(&mut stack, &text.unescape()?),
            Event::CData(cdata) => {
                let text = String::from_utf8(cdata.into_inner().into_owned()).map_err(|_| {
                    SourceError::Malformed {
                        reason: "CDATA section is not valid UTF-8".to_string(),
                        path: current_path(&stack),
                    }
                })?;
                append_text(&mut stack, &text);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(SourceError::Malformed {
            reason: "document ended inside an element".to_string(),
            path: current_path(&stack),
        });
    }

    root.map(Element::into_data)
        .ok_or_else(|| SourceError::Malformed {
            reason: "document has no root element".to_string(),
            path: "/".to_string(),
        })
}

fn check_nesting(stack: &[Element]) -> Result<(), SourceError> {
    if stack.len() >= MAX_DOCUMENT_NESTING {
        return Err(SourceError::Malformed {
            reason: format!("elements nested deeper than {MAX_DOCUMENT_NESTING} levels"),
            path: current_path(stack),
        });
    }
    Ok(())
}

fn open(start: &BytesStart<'_>) -> Result<Element, SourceError> {
    let mut element = Element::new(utf8(start.local_name().as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = attribute.key;
        if key.as_ref() == b"xmlns" || key.as_ref().starts_with(b"xmlns:") {
            continue;
        }
        let name = utf8(key.local_name().as_ref())?;
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.push((name, Raw::Text(value)));
    }
    Ok(element)
}

fn close(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), SourceError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(SourceError::Malformed {
                reason: format!("second root element <{}>", element.name),
                path: "/".to_string(),
            });
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) {
    // Text outside the root element carries no data
    if let Some(element) = stack.last_mut() {
        match &mut element.content {
            Some(Raw::Text(existing)) => existing.push_str(text),
            _ => element.content = Some(Raw::Text(text.to_string())),
        }
    }
}

fn current_path(stack: &[Element]) -> String {
    let mut path = String::new();
    for element in stack {
        path.push('/');
        path.push_str(&element.name);
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

fn utf8(bytes: &[u8]) -> Result<String, SourceError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| SourceError::Malformed {
            reason: "name is not valid UTF-8".to_string(),
            path: "/".to_string(),
        })
}

/// Writes `element` as an indented XML document with a UTF-8 declaration.
pub fn write(element: &Element) -> Result<String, SourceError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    write_element(&mut writer, element)?;

    String::from_utf8(writer.into_inner()).map_err(write_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), SourceError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, raw) in &element.attributes {
        let value = raw_text(raw);
        start.push_attribute((name.as_str(), value.as_str()));
    }

    let content = element.content.as_ref().map(raw_text);
    if element.children.is_empty() && content.is_none() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    if let Some(content) = content {
        writer
            .write_event(Event::Text(BytesText::new(&content)))
            .map_err(write_error)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_error)
}

fn raw_text(raw: &Raw) -> String {
    match raw {
        Raw::Text(text) => text.clone(),
        Raw::Bool(b) => b.to_string(),
    }
}

fn write_error(err: impl std::fmt::Display) -> SourceError {
    SourceError::Write {
        reason: err.to_string(),
    }
}
