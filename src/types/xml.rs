//! XML response parsing
//!
//! Both documents we read are tiny, so a streaming pass with quick-xml is
//! enough; no DOM is built.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::types::{AuthToken, LibrarySection};
use crate::{Error, Result};

const AUTH_TOKEN_ELEMENT: &[u8] = b"authentication-token";
const DIRECTORY_ELEMENT: &[u8] = b"Directory";

/// Extract the first `authentication-token` element (at any depth) from a
/// Plex.tv sign-in response
pub fn parse_auth_token(xml: &[u8]) -> Result<AuthToken> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut inside_token = false;
    let mut token = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == AUTH_TOKEN_ELEMENT => {
                inside_token = true;
            }
            Event::Empty(e) if e.local_name().as_ref() == AUTH_TOKEN_ELEMENT => {
                return Err(Error::protocol("authentication-token element is empty"));
            }
            Event::Text(e) if inside_token => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::protocol(format!("Invalid token text: {}", e)))?;
                token.push_str(&text);
            }
            Event::CData(e) if inside_token => {
                token.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::End(e) if inside_token && e.local_name().as_ref() == AUTH_TOKEN_ELEMENT => {
                break;
            }
            Event::Eof => {
                return Err(Error::protocol(
                    "authentication-token element not found in response",
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::protocol("authentication-token element is empty"));
    }
    Ok(AuthToken::new(token))
}

/// Collect every `Directory` element (at any depth) of a
/// `/library/sections` response
///
/// A `Directory` without `type` or `key`, or a document that ends before its
/// root element is closed, is a protocol error. An empty list is not an error
/// here; the caller decides what it means.
pub fn parse_sections(xml: &[u8]) -> Result<Vec<LibrarySection>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut sections = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                if e.local_name().as_ref() == DIRECTORY_ELEMENT {
                    sections.push(section_from_element(&e)?);
                }
            }
            Event::Empty(e) if e.local_name().as_ref() == DIRECTORY_ELEMENT => {
                sections.push(section_from_element(&e)?);
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            // quick-xml reports EOF inside an open element as a clean end
            Event::Eof if depth > 0 => {
                return Err(Error::protocol("truncated sections document"));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sections)
}

fn section_from_element(e: &BytesStart<'_>) -> Result<LibrarySection> {
    let mut key = None;
    let mut section_type = None;
    let mut title = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::protocol(format!("Malformed attribute: {}", e)))?;
        let value = attr
            .unescape_value()
            .map_err(|e| Error::protocol(format!("Malformed attribute value: {}", e)))?
            .into_owned();
        match attr.key.as_ref() {
            b"key" => key = Some(value),
            b"type" => section_type = Some(value),
            b"title" => title = Some(value),
            _ => {}
        }
    }

    let key = key.ok_or_else(|| Error::protocol("Directory element without a key attribute"))?;
    let section_type = section_type.ok_or_else(|| {
        Error::protocol(format!(
            "Directory element {} without a type attribute",
            key
        ))
    })?;

    Ok(LibrarySection {
        key,
        section_type,
        title,
    })
}
