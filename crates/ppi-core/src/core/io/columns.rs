//! Fixed-width column layout of PDB coordinate records.
//!
//! Reader and writer both address record fields exclusively through the
//! [`Field`] constants in this module, so the two can never disagree on
//! offsets. Ranges are 0-based and end-exclusive.

/// Alignment of a value inside its field when a record is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Right,
}

/// A named column range within a fixed-width record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub justify: Justify,
}

impl Field {
    const fn new(name: &'static str, start: usize, end: usize, justify: Justify) -> Self {
        Self {
            name,
            start,
            end,
            justify,
        }
    }

    pub const fn width(&self) -> usize {
        self.end - self.start
    }

    /// The untrimmed contents of this field in `line`.
    ///
    /// Lines shorter than the field end are tolerated: the missing columns are
    /// treated as blank.
    pub fn raw<'a>(&self, line: &'a str) -> &'a str {
        let len = line.len();
        line.get(self.start.min(len)..self.end.min(len))
            .unwrap_or("")
    }

    /// The contents of this field in `line` with surrounding whitespace removed.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        self.raw(line).trim()
    }

    /// Human-readable 1-based column range, as used in format documentation.
    pub fn columns(&self) -> String {
        format!("{}-{}", self.start + 1, self.end)
    }
}

pub const RECORD_WIDTH: usize = 80;

pub const RECORD_NAME: Field = Field::new("record name", 0, 6, Justify::Left);
pub const SERIAL: Field = Field::new("atom serial number", 6, 11, Justify::Right);
pub const ATOM_NAME: Field = Field::new("atom name", 12, 16, Justify::Left);
pub const ALT_LOC: Field = Field::new("alternate location", 16, 17, Justify::Left);
pub const RESIDUE_NAME: Field = Field::new("residue name", 17, 20, Justify::Right);
pub const CHAIN_ID: Field = Field::new("chain identifier", 21, 22, Justify::Left);
pub const RESIDUE_NUMBER: Field = Field::new("residue sequence number", 22, 26, Justify::Right);
pub const X: Field = Field::new("x coordinate", 30, 38, Justify::Right);
pub const Y: Field = Field::new("y coordinate", 38, 46, Justify::Right);
pub const Z: Field = Field::new("z coordinate", 46, 54, Justify::Right);
pub const OCCUPANCY: Field = Field::new("occupancy", 54, 60, Justify::Right);
pub const TEMPERATURE_FACTOR: Field = Field::new("temperature factor", 60, 66, Justify::Right);
pub const ELEMENT: Field = Field::new("element symbol", 76, 78, Justify::Right);

pub const HEADER_ID_CODE: Field = Field::new("id code", 62, 66, Justify::Left);

/// A record under construction, addressed field by field.
pub struct RecordLine {
    buf: Vec<char>,
}

impl RecordLine {
    pub fn new(record_name: &str) -> Self {
        let mut line = Self {
            buf: vec![' '; RECORD_WIDTH],
        };
        // Record names are at most six characters; this cannot overflow.
        let _ = line.put(&RECORD_NAME, record_name);
        line
    }

    /// Writes `value` into `field`, padded according to the field's justification.
    ///
    /// # Errors
    ///
    /// Returns the field and the offending value if it is wider than the field.
    pub fn put(&mut self, field: &Field, value: &str) -> Result<&mut Self, (Field, String)> {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() > field.width() {
            return Err((*field, value.to_string()));
        }
        let offset = match field.justify {
            Justify::Left => field.start,
            Justify::Right => field.end - chars.len(),
        };
        self.buf[offset..offset + chars.len()].copy_from_slice(&chars);
        Ok(self)
    }

    /// Finishes the record, dropping trailing blanks.
    pub fn finish(&self) -> String {
        let line: String = self.buf.iter().collect();
        line.trim_end().to_string()
    }
}
