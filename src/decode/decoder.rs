//! Document decoder
//!
//! Drives the top-level token scan.

use super::header::{parse_header, read_attributes};
use super::types::DecoderConfig;
use crate::destination::{Bindings, Bound, Destination, Registry};
use crate::error::{Error, Result};
use crate::metadata::Metadata;
use crate::types::parse_time;
use chrono::{DateTime, FixedOffset};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::any::Any;
use std::io::{BufRead, BufReader, Read};
use tracing::debug;

/// Decode a document held in memory into `dest`
pub fn decode<D: Destination>(data: &[u8], dest: &mut D) -> Result<Metadata> {
    Decoder::from_buf_reader(data).decode(dest)
}

/// Decode a document read from `reader` into `dest`
pub fn decode_reader<R: Read, D: Destination>(reader: R, dest: &mut D) -> Result<Metadata> {
    Decoder::new(reader).decode(dest)
}

/// Owned view of one tokenizer event
pub(super) enum Token {
    Start {
        elem: BytesStart<'static>,
        empty: bool,
    },
    End(Vec<u8>),
    Text(String),
    Eof,
    Other,
}

/// A row set document decoder reading a particular input stream
pub struct Decoder<R> {
    pub(super) reader: Reader<R>,
    pub(super) config: DecoderConfig,
    buf: Vec<u8>,
}

impl<R: Read> Decoder<BufReader<R>> {
    /// Create a decoder over an unbuffered reader
    pub fn new(reader: R) -> Self {
        Self::from_buf_reader(BufReader::new(reader))
    }
}

impl<R: BufRead> Decoder<R> {
    /// Create a decoder over a buffered reader
    pub fn from_buf_reader(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        Self {
            reader,
            config: DecoderConfig::default(),
            buf: Vec::new(),
        }
    }

    /// Replace the decoder configuration
    #[must_use]
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Borrow the underlying reader
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Consume the decoder, returning the underlying reader
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Decode the document into `dest`.
    ///
    /// Row sets are matched to fields by name (see
    /// [`Schema`](crate::destination::Schema)). Rows are appended to the
    /// bound collections in document order.
    pub fn decode<D: Destination>(&mut self, dest: &mut D) -> Result<Metadata> {
        let mut bound = Bound::new(dest)?;
        self.scan(&mut bound)
    }

    /// Decode into a target whose type is only known at runtime.
    ///
    /// The target's type must be registered in `registry`; otherwise the
    /// call fails with `InvalidTarget` without reading any input.
    pub fn decode_dyn(&mut self, registry: &Registry, target: &mut dyn Any) -> Result<Metadata> {
        let mut bound = registry.bind(target)?;
        self.scan(bound.as_mut())
    }

    fn scan(&mut self, fields: &mut dyn Bindings) -> Result<Metadata> {
        let mut expires: Option<String> = None;
        let mut row_sets = Vec::new();

        loop {
            let (elem, empty) = match self.next_token()? {
                Token::Eof => break,
                Token::Start { elem, empty } => (elem, empty),
                _ => continue,
            };

            let local = elem.local_name();
            if local.as_ref() == self.config.expiry_element.as_bytes() {
                let text = if empty {
                    String::new()
                } else {
                    self.read_text()?
                };
                if expires.is_some() {
                    debug!("Repeated <{}> element; keeping the last value", self.config.expiry_element);
                }
                expires = Some(text);
            } else if local.as_ref() == self.config.rowset_element.as_bytes() {
                let header = parse_header(&read_attributes(&elem)?);
                if !empty {
                    self.decode_row_set(&header.name, fields)?;
                }
                row_sets.push(header);
            }
        }

        let expires = self.parse_expiry(expires)?;
        debug!(
            "Decoded {} row sets, cached until {}",
            row_sets.len(),
            expires
        );

        Ok(Metadata { expires, row_sets })
    }

    fn decode_row_set(&mut self, name: &str, fields: &mut dyn Bindings) -> Result<()> {
        let sink = if name.is_empty() {
            None
        } else {
            fields.sink(name)
        };

        match sink {
            Some(sink) => self.decode_rows(name, sink),
            None => {
                debug!("Skipping unbound row set '{}'", name);
                self.skip_element(name)
            }
        }
    }

    fn parse_expiry(&self, raw: Option<String>) -> Result<DateTime<FixedOffset>> {
        let Some(raw) = raw else {
            return Err(Error::time_parse(
                "",
                format!("document has no <{}> element", self.config.expiry_element),
            ));
        };

        parse_time(&raw, &self.config.time_format, self.config.timezone)
            .map_err(|message| Error::time_parse(raw.as_str(), message))
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    pub(super) fn next_token(&mut self) -> Result<Token> {
        self.buf.clear();
        let token = match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(e) => Token::Start {
                elem: e.into_owned(),
                empty: false,
            },
            Event::Empty(e) => Token::Start {
                elem: e.into_owned(),
                empty: true,
            },
            Event::End(e) => Token::End(e.local_name().as_ref().to_vec()),
            Event::Text(e) => Token::Text(e.unescape()?.into_owned()),
            Event::CData(e) => Token::Text(String::from_utf8_lossy(&e).into_owned()),
            Event::Eof => Token::Eof,
            _ => Token::Other,
        };
        Ok(token)
    }

    /// Consume tokens up to and including the end of the element just
    /// opened. `context` names the element for the EOF error.
    pub(super) fn skip_element(&mut self, context: &str) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.next_token()? {
                Token::Eof => return Err(Error::unexpected_eof(context)),
                Token::Start { empty: false, .. } => depth += 1,
                Token::End(_) if depth == 0 => return Ok(()),
                Token::End(_) => depth -= 1,
                _ => {}
            }
        }
    }

    /// Character data directly inside the element just opened. Nested
    /// elements are skipped.
    fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            match self.next_token()? {
                Token::Text(t) if depth == 0 => text.push_str(&t),
                Token::Start { empty: false, .. } => depth += 1,
                Token::End(_) if depth == 0 => return Ok(text),
                Token::End(_) => depth -= 1,
                Token::Eof => {
                    return Err(Error::time_parse(
                        text,
                        format!(
                            "document ended inside <{}>",
                            self.config.expiry_element
                        ),
                    ))
                }
                _ => {}
            }
        }
    }
}
