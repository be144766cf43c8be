//! The `.dbf` attribute table (dBase III).

use crate::error::DatasetError;
use crate::feature::FieldValue;
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::io::{self, Read};
use std::path::PathBuf;

const HEADER_LEN: usize = 32;
const FIELD_DESCRIPTOR_LEN: usize = 32;
const HEADER_TERMINATOR: u8 = 0x0D;
const FIELD_NAME_LEN: usize = 11;
const LANGUAGE_DRIVER_OFFSET: usize = 29;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct FieldDescriptor {
    pub name: String,
    pub kind: u8,
    pub len: usize,
    pub decimals: u8,
}

/// Reads the records of a `.dbf` file one by one.
pub(super) struct DbfReader<R> {
    reader: R,
    path: PathBuf,
    fields: Vec<FieldDescriptor>,
    record_count: u64,
    record_len: usize,
    read: u64,
    encoding: TextEncoding,
}

impl<R: Read> DbfReader<R> {
    /// Reads the header. Text is decoded with `encoding` if given, else with the
    /// code page of the header language driver byte.
    pub fn new(
        mut reader: R,
        path: PathBuf,
        encoding: Option<&'static Encoding>,
    ) -> Result<Self, DatasetError> {
        let mut header = [0; HEADER_LEN];
        reader
            .read_exact(&mut header)
            .map_err(|e| DatasetError::io(&path, e))?;
        let encoding = TextEncoding(
            encoding.or_else(|| encoding_for_language_driver(header[LANGUAGE_DRIVER_OFFSET])),
        );
        let record_count = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let header_len = usize::from(u16::from_le_bytes([header[8], header[9]]));
        let record_len = usize::from(u16::from_le_bytes([header[10], header[11]]));

        let mut fields = Vec::new();
        let mut consumed = HEADER_LEN;
        loop {
            let mut first = [0; 1];
            reader
                .read_exact(&mut first)
                .map_err(|e| DatasetError::io(&path, e))?;
            consumed += 1;
            if first[0] == HEADER_TERMINATOR {
                break;
            }
            let mut descriptor = [0; FIELD_DESCRIPTOR_LEN];
            descriptor[0] = first[0];
            reader
                .read_exact(&mut descriptor[1..])
                .map_err(|e| DatasetError::io(&path, e))?;
            consumed += FIELD_DESCRIPTOR_LEN - 1;
            fields.push(parse_field_descriptor(&descriptor, encoding));
        }
        // Some writers put extra bytes between the descriptors and the first record
        if header_len > consumed {
            io::copy(
                &mut (&mut reader).take((header_len - consumed) as u64),
                &mut io::sink(),
            )
            .map_err(|e| DatasetError::io(&path, e))?;
        }

        let fields_len = fields.iter().map(|f| f.len).sum::<usize>();
        if fields_len + 1 > record_len {
            return Err(DatasetError::msg(format!(
                "{}: the fields take {fields_len} bytes but records are only {record_len} bytes long",
                path.display()
            )));
        }
        Ok(Self {
            reader,
            path,
            fields,
            record_count: record_count.into(),
            record_len,
            read: 0,
            encoding,
        })
    }

    /// The number of records declared in the header.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn encoding(&self) -> Option<&'static Encoding> {
        self.encoding.0
    }

    /// Reads the next record, `Ok(None)` once all the declared records have been read.
    pub fn next_record(&mut self) -> Result<Option<Vec<(String, FieldValue)>>, DatasetError> {
        if self.read >= self.record_count {
            return Ok(None);
        }
        let mut record = vec![0; self.record_len];
        self.reader
            .read_exact(&mut record)
            .map_err(|e| DatasetError::io(&self.path, e))?;
        self.read += 1;
        // The first byte is the deletion flag
        let mut offset = 1;
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let bytes = &record[offset..offset + field.len];
            offset += field.len;
            let value = parse_value(field, bytes, self.encoding).map_err(|e| {
                DatasetError::msg(format!(
                    "{}: record {}, field {}: {e}",
                    self.path.display(),
                    self.read,
                    field.name
                ))
            })?;
            values.push((field.name.clone(), value));
        }
        Ok(Some(values))
    }
}

fn parse_field_descriptor(
    descriptor: &[u8; FIELD_DESCRIPTOR_LEN],
    encoding: TextEncoding,
) -> FieldDescriptor {
    let name = &descriptor[..FIELD_NAME_LEN];
    let name = name
        .iter()
        .position(|b| *b == 0)
        .map_or(name, |end| &name[..end]);
    FieldDescriptor {
        name: encoding.decode(name).trim().to_owned(),
        kind: descriptor[11],
        len: descriptor[16].into(),
        decimals: descriptor[17],
    }
}

/// The code page of the text values.
///
/// Without a known code page, text is decoded as UTF-8 with a Windows-1252 fallback.
#[derive(Debug, Clone, Copy, Default)]
struct TextEncoding(Option<&'static Encoding>);

impl TextEncoding {
    fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        if let Some(encoding) = self.0 {
            return encoding.decode_without_bom_handling(bytes).0;
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => text.into(),
            Err(_) => encoding_rs::WINDOWS_1252
                .decode_without_bom_handling(bytes)
                .0,
        }
    }
}

/// The encoding named in a `.cpg` file, like `UTF-8`, `1251`, `ANSI 1252` or `88591`.
pub(super) fn encoding_from_cpg(label: &str) -> Option<&'static Encoding> {
    let label = label.trim();
    let label = label
        .strip_prefix("ANSI")
        .or_else(|| label.strip_prefix("ansi"))
        .map_or(label, str::trim_start);
    if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
        return Some(encoding);
    }
    if !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(part) = label.strip_prefix("8859") {
            return Encoding::for_label(format!("iso-8859-{part}").as_bytes());
        }
        return Encoding::for_label(format!("windows-{label}").as_bytes())
            .or_else(|| Encoding::for_label(format!("cp{label}").as_bytes()));
    }
    None
}

/// The code page of a dBase language driver id.
///
/// DOS code pages without an `encoding_rs` counterpart (437, 850, 852...) are not mapped.
fn encoding_for_language_driver(id: u8) -> Option<&'static Encoding> {
    Some(match id {
        0x03 | 0x57 | 0x58 | 0x59 => encoding_rs::WINDOWS_1252,
        0x13 | 0x7B => encoding_rs::SHIFT_JIS,
        0x26 | 0x65 => encoding_rs::IBM866,
        0x4D => encoding_rs::GBK,
        0x4E => encoding_rs::EUC_KR,
        0x4F => encoding_rs::BIG5,
        0x7C => encoding_rs::WINDOWS_874,
        0x7D => encoding_rs::WINDOWS_1255,
        0x7E => encoding_rs::WINDOWS_1256,
        0xC8 => encoding_rs::WINDOWS_1250,
        0xC9 => encoding_rs::WINDOWS_1251,
        0xCA => encoding_rs::WINDOWS_1254,
        0xCB => encoding_rs::WINDOWS_1253,
        0xCC => encoding_rs::WINDOWS_1257,
        _ => return None,
    })
}

fn parse_value(
    field: &FieldDescriptor,
    bytes: &[u8],
    encoding: TextEncoding,
) -> Result<FieldValue, String> {
    Ok(match field.kind {
        b'N' | b'F' => {
            let text = encoding.decode(bytes);
            let text = text.trim_matches([' ', '\0']);
            if text.is_empty() || text.bytes().all(|b| b == b'*') {
                return Ok(FieldValue::Null);
            }
            if field.decimals == 0 {
                if let Ok(value) = text.parse::<i64>() {
                    return Ok(FieldValue::Integer(value));
                }
            }
            FieldValue::Float(
                text.parse()
                    .map_err(|_| format!("'{text}' is not a number"))?,
            )
        }
        b'L' => match bytes.first() {
            Some(b'T' | b't' | b'Y' | b'y') => FieldValue::Boolean(true),
            Some(b'F' | b'f' | b'N' | b'n') => FieldValue::Boolean(false),
            _ => FieldValue::Null,
        },
        b'D' => {
            let text = encoding.decode(bytes);
            let text = text.trim_matches([' ', '\0']);
            if text.is_empty() || text.bytes().all(|b| b == b'0') {
                return Ok(FieldValue::Null);
            }
            if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("'{text}' is not a YYYYMMDD date"));
            }
            FieldValue::Date(format!("{}-{}-{}", &text[..4], &text[4..6], &text[6..]))
        }
        b'I' => {
            let bytes = bytes
                .first_chunk::<4>()
                .ok_or_else(|| "integer fields must be 4 bytes long".to_owned())?;
            FieldValue::Integer(i32::from_le_bytes(*bytes).into())
        }
        // Character fields and the types without a better mapping
        _ => FieldValue::String(encoding.decode(bytes).trim_end_matches([' ', '\0']).to_owned()),
    })
}
