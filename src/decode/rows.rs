//! Row decoding for a bound row set

use super::decoder::{Decoder, Token};
use super::header::read_attributes;
use crate::error::{Error, Result};
use crate::record::RowSink;
use std::io::BufRead;
use tracing::{debug, trace};

impl<R: BufRead> Decoder<R> {
    /// Consume the body of row set `rowset`, appending each row to `sink`.
    ///
    /// Stops after the row set's closing tag. A row that fails to parse
    /// is not kept and aborts the decode.
    pub(super) fn decode_rows(&mut self, rowset: &str, sink: &mut dyn RowSink) -> Result<()> {
        let mut index = 0usize;

        loop {
            match self.next_token()? {
                Token::Eof => return Err(Error::unexpected_eof(rowset)),
                Token::End(name) if name == self.config.rowset_element.as_bytes() => {
                    debug!(
                        "Decoded {} rows into row set '{}' ({} held)",
                        index,
                        rowset,
                        sink.row_count()
                    );
                    return Ok(());
                }
                Token::Start { elem, empty } => {
                    if elem.local_name().as_ref() != self.config.row_element.as_bytes() {
                        return Err(Error::schema(format!(
                            "unexpected token in row set: {}",
                            String::from_utf8_lossy(elem.local_name().as_ref())
                        )));
                    }

                    let attrs = read_attributes(&elem)?;
                    sink.push_row(&attrs).map_err(|source| Error::RowParse {
                        rowset: rowset.to_string(),
                        index,
                        source,
                    })?;
                    trace!("Row {} of '{}': {} attributes", index, rowset, attrs.len());
                    index += 1;

                    if !empty {
                        self.skip_element(rowset)?;
                    }
                }
                _ => {}
            }
        }
    }
}
