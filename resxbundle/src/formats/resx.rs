//! Support for .NET `.resx` resource files.
//!
//! Reads `<data>` nodes (name, declared type, mime type, value and comment)
//! and `<resheader>` entries. The embedded schema, `<metadata>` and
//! `<assembly>` elements are skipped. Values are kept as written; resolving
//! them to typed values is the job of [`crate::extract`].

use std::{fs::File, io::BufRead, io::Read, path::Path};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
    name::QName,
};
use serde::Serialize;

use crate::{error::Error, traits::Parser};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Format {
    pub headers: Vec<ResHeader>,
    pub nodes: Vec<DataNode>,
}

/// A `<resheader name="...">` entry, e.g. `resmimetype`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResHeader {
    pub name: String,
    pub value: String,
}

/// A raw `<data>` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataNode {
    pub name: String,
    pub value: String,
    /// Assembly-qualified CLR type from the `type` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// The `mimetype` attribute; set for serialized objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Format {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        // Whitespace inside <value> is significant.
        xml_reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut format = Format::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"data" => {
                    let element = parse_element(e, &mut xml_reader, b"data")?;
                    format.nodes.push(element.into_data_node()?);
                }
                Ok(Event::Empty(ref e)) if e.name().as_ref() == b"data" => {
                    let element = parse_attributes(e)?;
                    format.nodes.push(element.into_data_node()?);
                }
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"resheader" => {
                    let element = parse_element(e, &mut xml_reader, b"resheader")?;
                    format.headers.push(element.into_header()?);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        Ok(format)
    }

    /// BOM-aware reading, so UTF-16 resx files decode as well as UTF-8 ones.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding_rs::UTF_8))
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

/// Attributes and children shared by `<data>` and `<resheader>`.
#[derive(Debug, Default)]
struct RawElement {
    name: Option<String>,
    type_name: Option<String>,
    mime_type: Option<String>,
    value: Option<String>,
    comment: Option<String>,
}

impl RawElement {
    fn into_data_node(self) -> Result<DataNode, Error> {
        let name = self
            .name
            .ok_or_else(|| Error::InvalidResource("data tag missing 'name'".to_string()))?;
        Ok(DataNode {
            name,
            value: self.value.unwrap_or_default(),
            type_name: self.type_name,
            mime_type: self.mime_type,
            comment: self.comment,
        })
    }

    fn into_header(self) -> Result<ResHeader, Error> {
        let name = self
            .name
            .ok_or_else(|| Error::InvalidResource("resheader tag missing 'name'".to_string()))?;
        Ok(ResHeader {
            name,
            value: self.value.unwrap_or_default(),
        })
    }
}

fn parse_attributes(e: &BytesStart) -> Result<RawElement, Error> {
    let mut element = RawElement::default();
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::InvalidResource(e.to_string()))?;
        match attr.key.as_ref() {
            b"name" => element.name = Some(attr.unescape_value()?.to_string()),
            b"type" => element.type_name = Some(attr.unescape_value()?.to_string()),
            b"mimetype" => element.mime_type = Some(attr.unescape_value()?.to_string()),
            _ => {}
        }
    }
    Ok(element)
}

fn parse_element<R: BufRead>(
    e: &BytesStart,
    xml_reader: &mut Reader<R>,
    end_tag: &[u8],
) -> Result<RawElement, Error> {
    let mut element = parse_attributes(e)?;

    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref child)) if child.name().as_ref() == b"value" => {
                element.value = Some(read_text(xml_reader, b"value")?);
            }
            Ok(Event::Start(ref child)) if child.name().as_ref() == b"comment" => {
                element.comment = Some(read_text(xml_reader, b"comment")?);
            }
            Ok(Event::Empty(ref child)) if child.name().as_ref() == b"value" => {
                element.value = Some(String::new());
            }
            Ok(Event::Start(ref child)) => {
                let unknown = child.name().as_ref().to_vec();
                let mut skip = Vec::new();
                xml_reader.read_to_end_into(QName(&unknown), &mut skip)?;
            }
            Ok(Event::End(ref end)) if end.name().as_ref() == end_tag => break,
            Ok(Event::Eof) => {
                return Err(Error::InvalidResource(format!(
                    "unexpected EOF inside <{}>",
                    String::from_utf8_lossy(end_tag)
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }

    Ok(element)
}

fn read_text<R: BufRead>(xml_reader: &mut Reader<R>, end_tag: &[u8]) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => text.push_str(&e.unescape().map_err(Error::XmlParse)?),
            Ok(Event::CData(e)) => {
                let raw = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|e| Error::InvalidResource(e.to_string()))?;
                text.push_str(&raw);
            }
            Ok(Event::End(ref end)) if end.name().as_ref() == end_tag => break,
            Ok(Event::Eof) => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(text)
}
