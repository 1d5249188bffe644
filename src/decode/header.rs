//! Row set header parsing

use crate::error::Result;
use crate::metadata::RowSet;
use crate::record::Attributes;
use quick_xml::events::BytesStart;

/// Build row set metadata from the row set's opening tag attributes.
///
/// `name` is taken verbatim; `key` and `columns` are split on commas with
/// empty segments kept. Other attributes are ignored. A missing `name`
/// leaves the name empty, which the decoder treats as unbound.
pub fn parse_header(attrs: &Attributes) -> RowSet {
    let mut header = RowSet::default();

    for (name, value) in attrs.iter() {
        match name {
            "name" => header.name = value.to_string(),
            "key" => header.keys = split_list(value),
            "columns" => header.columns = split_list(value),
            _ => {}
        }
    }

    header
}

/// Split a comma separated attribute value
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

/// Collect an element's attributes by local name
pub(crate) fn read_attributes(elem: &BytesStart<'_>) -> Result<Attributes> {
    let mut attrs = Attributes::new();

    for attr in elem.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.unescape_value()?;
        attrs.push(String::from_utf8_lossy(attr.key.local_name().as_ref()), value);
    }

    Ok(attrs)
}
