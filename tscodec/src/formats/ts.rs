//! Support for the Qt Linguist `.ts` XML format.
//!
//! The reader accepts every element Linguist writes for a message (locations,
//! old sources, developer and translator comments, numerus forms) and skips
//! unknown elements with a warning. The writer reproduces Linguist's own layout
//! so that a parse/write cycle leaves a file byte-for-byte stable.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use crate::{
    error::Error,
    traits::Parser,
    types::{Catalog, Context, Location, Message, Translation, TranslationStatus},
};

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub catalog: Catalog,
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.name().as_ref() == b"TS" => {
                    let catalog = parse_catalog(e, &mut xml_reader)?;
                    return Ok(Format { catalog });
                }
                Event::Empty(ref e) if e.name().as_ref() == b"TS" => {
                    return Ok(Format {
                        catalog: catalog_from_root(e)?,
                    });
                }
                Event::Start(ref e) | Event::Empty(ref e) => {
                    return Err(Error::malformed(
                        format!(
                            "expected <TS> root element, found <{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        ),
                        xml_reader.buffer_position() as u64,
                    ));
                }
                Event::Eof => {
                    return Err(Error::InvalidResource(
                        "missing <TS> root element".to_string(),
                    ));
                }
                _ => {}
            }
            buf.clear();
        }
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let catalog = &self.catalog;
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::DocType(BytesText::from_escaped("TS")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        let mut root = BytesStart::new("TS");
        if let Some(version) = &catalog.version {
            root.push_attribute(("version", version.as_str()));
        }
        if !catalog.language.is_empty() {
            root.push_attribute(("language", catalog.language.as_str()));
        }
        if let Some(source_language) = &catalog.source_language {
            root.push_attribute(("sourcelanguage", source_language.as_str()));
        }
        xml_writer.write_event(Event::Start(root))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        for context in &catalog.contexts {
            write_context(&mut xml_writer, context)?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("TS")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

impl From<Catalog> for Format {
    fn from(catalog: Catalog) -> Self {
        Format { catalog }
    }
}

impl From<Format> for Catalog {
    fn from(format: Format) -> Self {
        format.catalog
    }
}

fn attribute(e: &BytesStart, name: &[u8]) -> Result<Option<String>, Error> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn catalog_from_root(e: &BytesStart) -> Result<Catalog, Error> {
    Ok(Catalog {
        language: attribute(e, b"language")?.unwrap_or_default(),
        source_language: attribute(e, b"sourcelanguage")?,
        version: attribute(e, b"version")?,
        contexts: Vec::new(),
    })
}

fn parse_catalog<R: BufRead>(
    start: &BytesStart,
    xml_reader: &mut Reader<R>,
) -> Result<Catalog, Error> {
    let mut catalog = catalog_from_root(start)?;
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"context" => {
                let context = parse_context(e, xml_reader)?;
                catalog.contexts.push(context);
            }
            Event::Empty(ref e) if e.name().as_ref() == b"context" => {
                return Err(Error::malformed(
                    "<context> without <name>",
                    xml_reader.buffer_position() as u64,
                ));
            }
            Event::Start(ref e) => skip_element(e, xml_reader)?,
            Event::End(ref e) if e.name().as_ref() == b"TS" => break,
            Event::Eof => {
                return Err(Error::malformed(
                    "unexpected end of file inside <TS>",
                    xml_reader.buffer_position() as u64,
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(
        language = %catalog.language,
        contexts = catalog.contexts.len(),
        messages = catalog.message_count(),
        "parsed TS catalog"
    );
    Ok(catalog)
}

fn parse_context<R: BufRead>(
    start: &BytesStart,
    xml_reader: &mut Reader<R>,
) -> Result<Context, Error> {
    let mut context = Context {
        encoding: attribute(start, b"encoding")?,
        ..Default::default()
    };
    let mut name = None;
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"name" => name = Some(read_text(xml_reader, b"name")?),
                b"comment" => context.comment = Some(read_text(xml_reader, b"comment")?),
                b"message" => {
                    let message = parse_message(e, xml_reader)?;
                    context.messages.push(message);
                }
                _ => skip_element(e, xml_reader)?,
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"name" => name = Some(String::new()),
                b"comment" => context.comment = Some(String::new()),
                b"message" => {
                    return Err(Error::malformed(
                        "<message> without <source>",
                        xml_reader.buffer_position() as u64,
                    ));
                }
                _ => {}
            },
            Event::End(ref e) if e.name().as_ref() == b"context" => break,
            Event::Eof => {
                return Err(Error::malformed(
                    "unexpected end of file inside <context>",
                    xml_reader.buffer_position() as u64,
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    context.name = name.ok_or_else(|| {
        Error::malformed(
            "<context> without <name>",
            xml_reader.buffer_position() as u64,
        )
    })?;
    Ok(context)
}

fn parse_message<R: BufRead>(
    start: &BytesStart,
    xml_reader: &mut Reader<R>,
) -> Result<Message, Error> {
    let numerus = matches!(
        attribute(start, b"numerus")?.as_deref(),
        Some("yes") | Some("true")
    );
    let mut message = Message {
        id: attribute(start, b"id")?,
        numerus,
        ..Default::default()
    };
    let mut source = None;
    let mut has_translation = false;
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"source" => source = Some(read_text(xml_reader, b"source")?),
                b"oldsource" => message.old_source = Some(read_text(xml_reader, b"oldsource")?),
                b"comment" => message.comment = Some(read_text(xml_reader, b"comment")?),
                b"oldcomment" => {
                    message.old_comment = Some(read_text(xml_reader, b"oldcomment")?)
                }
                b"extracomment" => {
                    message.extra_comment = Some(read_text(xml_reader, b"extracomment")?)
                }
                b"translatorcomment" => {
                    message.translator_comment =
                        Some(read_text(xml_reader, b"translatorcomment")?)
                }
                b"translation" => {
                    let (translation, status) = parse_translation(e, xml_reader, numerus)?;
                    message.translation = translation;
                    message.status = status;
                    has_translation = true;
                }
                b"location" => {
                    message.locations.push(parse_location(e)?);
                    xml_reader.read_to_end_into(e.name(), &mut Vec::new())?;
                }
                _ => skip_element(e, xml_reader)?,
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"location" => message.locations.push(parse_location(e)?),
                b"source" => source = Some(String::new()),
                b"oldsource" => message.old_source = Some(String::new()),
                b"comment" => message.comment = Some(String::new()),
                b"oldcomment" => message.old_comment = Some(String::new()),
                b"extracomment" => message.extra_comment = Some(String::new()),
                b"translatorcomment" => message.translator_comment = Some(String::new()),
                b"translation" => {
                    message.status = parse_status(e, xml_reader.buffer_position() as u64)?;
                    message.translation = empty_translation(numerus);
                    has_translation = true;
                }
                _ => {}
            },
            Event::End(ref e) if e.name().as_ref() == b"message" => break,
            Event::Eof => {
                return Err(Error::malformed(
                    "unexpected end of file inside <message>",
                    xml_reader.buffer_position() as u64,
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    message.source = source.ok_or_else(|| {
        Error::malformed(
            "<message> without <source>",
            xml_reader.buffer_position() as u64,
        )
    })?;
    if !has_translation {
        message.translation = empty_translation(numerus);
        message.status = TranslationStatus::Unfinished;
    }
    Ok(message)
}

fn empty_translation(numerus: bool) -> Translation {
    if numerus {
        Translation::Plural(Vec::new())
    } else {
        Translation::Singular(String::new())
    }
}

fn parse_status(e: &BytesStart, position: u64) -> Result<TranslationStatus, Error> {
    match attribute(e, b"type")? {
        Some(value) => value
            .parse()
            .map_err(|message: String| Error::malformed(message, position)),
        None => Ok(TranslationStatus::Finished),
    }
}

fn parse_location(e: &BytesStart) -> Result<Location, Error> {
    Ok(Location {
        filename: attribute(e, b"filename")?,
        line: attribute(e, b"line")?,
    })
}

fn parse_translation<R: BufRead>(
    start: &BytesStart,
    xml_reader: &mut Reader<R>,
    numerus: bool,
) -> Result<(Translation, TranslationStatus), Error> {
    let status = parse_status(start, xml_reader.buffer_position() as u64)?;
    let mut text = String::new();
    let mut forms = Vec::new();
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Start(ref e) if e.name().as_ref() == b"numerusform" => {
                forms.push(read_text(xml_reader, b"numerusform")?);
            }
            Event::Empty(ref e) => match e.name().as_ref() {
                b"numerusform" => forms.push(String::new()),
                b"byte" => {
                    text.push(byte_char(e, xml_reader.buffer_position() as u64)?);
                }
                _ => {}
            },
            Event::Start(ref e) => skip_element(e, xml_reader)?,
            Event::End(ref e) if e.name().as_ref() == b"translation" => break,
            Event::Eof => {
                return Err(Error::malformed(
                    "unexpected end of file inside <translation>",
                    xml_reader.buffer_position() as u64,
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    let translation = if !forms.is_empty() {
        Translation::Plural(forms)
    } else if numerus {
        // A numerus message written without <numerusform> children.
        if text.trim().is_empty() {
            Translation::Plural(Vec::new())
        } else {
            Translation::Plural(vec![text])
        }
    } else {
        Translation::Singular(text)
    };
    Ok((translation, status))
}

/// Reads the character content of the element just opened, up to its end tag.
fn read_text<R: BufRead>(xml_reader: &mut Reader<R>, end: &[u8]) -> Result<String, Error> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Empty(ref e) if e.name().as_ref() == b"byte" => {
                text.push(byte_char(e, xml_reader.buffer_position() as u64)?);
            }
            Event::Start(ref e) => skip_element(e, xml_reader)?,
            Event::End(ref e) if e.name().as_ref() == end => break,
            Event::Eof => {
                return Err(Error::malformed(
                    format!(
                        "unexpected end of file inside <{}>",
                        String::from_utf8_lossy(end)
                    ),
                    xml_reader.buffer_position() as u64,
                ));
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

/// Decodes `<byte value="x9"/>`, Linguist's escape for characters XML cannot carry.
fn byte_char(e: &BytesStart, position: u64) -> Result<char, Error> {
    let value = attribute(e, b"value")?
        .ok_or_else(|| Error::malformed("<byte> without 'value'", position))?;
    let (radix, digits) = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix('x'))
    {
        Some(hex) => (16, hex),
        None => (10, value.as_str()),
    };
    let code = u32::from_str_radix(digits, radix)
        .map_err(|_| Error::malformed(format!("invalid <byte> value '{}'", value), position))?;
    char::from_u32(code)
        .ok_or_else(|| Error::malformed(format!("invalid <byte> value '{}'", value), position))
}

fn skip_element<R: BufRead>(e: &BytesStart, xml_reader: &mut Reader<R>) -> Result<(), Error> {
    tracing::warn!(
        element = %String::from_utf8_lossy(e.name().as_ref()),
        "skipping unsupported element"
    );
    let mut skip_buf = Vec::new();
    xml_reader.read_to_end_into(e.name(), &mut skip_buf)?;
    Ok(())
}

fn write_context<W: Write>(xml_writer: &mut Writer<W>, context: &Context) -> Result<(), Error> {
    let mut elem = BytesStart::new("context");
    if let Some(encoding) = &context.encoding {
        elem.push_attribute(("encoding", encoding.as_str()));
    }
    xml_writer.write_event(Event::Start(elem))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

    write_text_element(xml_writer, 1, "name", &context.name)?;
    if let Some(comment) = &context.comment {
        write_text_element(xml_writer, 1, "comment", comment)?;
    }
    for message in &context.messages {
        write_message(xml_writer, message)?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("context")))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}

fn write_message<W: Write>(xml_writer: &mut Writer<W>, message: &Message) -> Result<(), Error> {
    let mut elem = BytesStart::new("message");
    if let Some(id) = &message.id {
        elem.push_attribute(("id", id.as_str()));
    }
    if message.numerus {
        elem.push_attribute(("numerus", "yes"));
    }
    write_indent(xml_writer, 1)?;
    xml_writer.write_event(Event::Start(elem))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

    for location in &message.locations {
        let mut loc = BytesStart::new("location");
        if let Some(filename) = &location.filename {
            loc.push_attribute(("filename", filename.as_str()));
        }
        if let Some(line) = &location.line {
            loc.push_attribute(("line", line.as_str()));
        }
        write_indent(xml_writer, 2)?;
        xml_writer.write_event(Event::Empty(loc))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    }

    write_text_element(xml_writer, 2, "source", &message.source)?;
    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("oldcomment", &message.old_comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (tag, value) in optional {
        if let Some(value) = value {
            write_text_element(xml_writer, 2, tag, value)?;
        }
    }

    let mut translation = BytesStart::new("translation");
    if let Some(kind) = message.status.type_attribute() {
        translation.push_attribute(("type", kind));
    }
    write_indent(xml_writer, 2)?;
    xml_writer.write_event(Event::Start(translation))?;
    match &message.translation {
        Translation::Singular(value) => write_escaped_text(xml_writer, value)?,
        Translation::Plural(forms) if forms.is_empty() => {}
        Translation::Plural(forms) => {
            xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
            for form in forms {
                write_text_element(xml_writer, 3, "numerusform", form)?;
            }
            write_indent(xml_writer, 2)?;
        }
    }
    xml_writer.write_event(Event::End(BytesEnd::new("translation")))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

    write_indent(xml_writer, 1)?;
    xml_writer.write_event(Event::End(BytesEnd::new("message")))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}

fn write_indent<W: Write>(xml_writer: &mut Writer<W>, level: usize) -> Result<(), Error> {
    if level > 0 {
        xml_writer.write_event(Event::Text(BytesText::new(&INDENT.repeat(level))))?;
    }
    Ok(())
}

/// Writes `<tag>text</tag>` on its own line.
fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    level: usize,
    tag: &str,
    text: &str,
) -> Result<(), Error> {
    write_indent(xml_writer, level)?;
    xml_writer.write_event(Event::Start(BytesStart::new(tag)))?;
    write_escaped_text(xml_writer, text)?;
    xml_writer.write_event(Event::End(BytesEnd::new(tag)))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}

/// Writes character data, replacing characters XML 1.0 forbids with `<byte>` elements.
fn write_escaped_text<W: Write>(xml_writer: &mut Writer<W>, text: &str) -> Result<(), Error> {
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if is_forbidden_in_xml(c) {
            if start < i {
                xml_writer.write_event(Event::Text(BytesText::new(&text[start..i])))?;
            }
            let value = format!("x{:x}", c as u32);
            let mut byte = BytesStart::new("byte");
            byte.push_attribute(("value", value.as_str()));
            xml_writer.write_event(Event::Empty(byte))?;
            start = i + c.len_utf8();
        }
    }
    if start < text.len() {
        xml_writer.write_event(Event::Text(BytesText::new(&text[start..])))?;
    }
    Ok(())
}

fn is_forbidden_in_xml(c: char) -> bool {
    (c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{fffe}' | '\u{ffff}')
}
