use crate::core::io::columns::{self, Field, RecordLine};
use crate::core::io::traits::StructureFile;
use crate::core::models::builder::StructureBuilder;
use crate::core::models::structure::Structure;
use crate::core::utils::elements::{element_from_atom_name, lookup_atomic_mass};
use nalgebra::Point3;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    /// Four-character identifier from the HEADER record, if present.
    pub id_code: Option<String>,
    /// REMARK lines emitted before the coordinates when writing.
    pub remarks: Vec<String>,
    /// Atoms per element symbol that was absent from the mass table and
    /// therefore received the default mass.
    pub unknown_elements: BTreeMap<String, usize>,
    /// Number of models after the first that were not read.
    pub skipped_models: usize,
    /// Atom records dropped because an earlier alternate location of the
    /// same atom was already kept.
    pub skipped_alt_locs: usize,
}

impl PdbMetadata {
    pub fn unknown_element_atom_count(&self) -> usize {
        self.unknown_elements.values().sum()
    }
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Structure file not found: '{path}'", path = path.display())]
    NotFound { path: PathBuf },
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Value '{value}' does not fit the {field} field ({width} columns)")]
    FieldOverflow {
        field: &'static str,
        value: String,
        width: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer in {field} (columns {columns}, value: '{value}')")]
    InvalidInt {
        field: &'static str,
        columns: String,
        value: String,
    },
    #[error("Invalid float in {field} (columns {columns}, value: '{value}')")]
    InvalidFloat {
        field: &'static str,
        columns: String,
        value: String,
    },
}

impl PdbParseErrorKind {
    fn invalid_int(field: &Field, value: &str) -> Self {
        Self::InvalidInt {
            field: field.name,
            columns: field.columns(),
            value: value.to_string(),
        }
    }

    fn invalid_float(field: &Field, value: &str) -> Self {
        Self::InvalidFloat {
            field: field.name,
            columns: field.columns(),
            value: value.to_string(),
        }
    }
}

fn parse_float(line: &str, line_num: usize, field: &Field) -> Result<f64, PdbError> {
    let value = field.slice(line);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::invalid_float(field, value),
    })
}

fn parse_float_or(line: &str, field: &Field, default: f64) -> f64 {
    field.slice(line).parse().unwrap_or(default)
}

fn put(record: &mut RecordLine, field: &Field, value: &str) -> Result<(), PdbError> {
    record
        .put(field, value)
        .map(|_| ())
        .map_err(|(field, value)| PdbError::FieldOverflow {
            field: field.name,
            value,
            width: field.width(),
        })
}

/// Lays out an atom name inside the four-column name field.
///
/// Names of one-letter elements that are shorter than four characters start in
/// the second column (" CA "), everything else starts in the first.
fn padded_atom_name(name: &str, element: &str) -> String {
    if name.chars().count() >= 4 || element.trim().chars().count() == 2 {
        name.to_string()
    } else {
        format!(" {}", name)
    }
}

/// Atoms that carried an alternate location indicator, keyed by chain,
/// residue number and atom name.
type AltLocSeen = HashSet<(char, isize, String)>;

pub struct PdbFile;

impl PdbFile {
    fn parse_atom_record(
        builder: &mut StructureBuilder,
        metadata: &mut PdbMetadata,
        alt_locs: &mut AltLocSeen,
        line: &str,
        line_num: usize,
        fallback_serial: usize,
    ) -> Result<(), PdbError> {
        let record_type = columns::RECORD_NAME.slice(line);

        let serial = columns::SERIAL
            .slice(line)
            .parse::<usize>()
            .unwrap_or(fallback_serial);
        let name = columns::ATOM_NAME.slice(line);
        let res_name = columns::RESIDUE_NAME.slice(line);
        let chain_id = columns::CHAIN_ID.raw(line).chars().next().unwrap_or(' ');

        let res_num_str = columns::RESIDUE_NUMBER.slice(line);
        let res_num: isize = res_num_str.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::invalid_int(&columns::RESIDUE_NUMBER, res_num_str),
        })?;

        let x = parse_float(line, line_num, &columns::X)?;
        let y = parse_float(line, line_num, &columns::Y)?;
        let z = parse_float(line, line_num, &columns::Z)?;

        // Only the first conformer of a disordered atom is kept.
        if !columns::ALT_LOC.slice(line).is_empty()
            && !alt_locs.insert((chain_id, res_num, name.to_string()))
        {
            metadata.skipped_alt_locs += 1;
            return Ok(());
        }

        let element = match columns::ELEMENT.slice(line) {
            "" => element_from_atom_name(columns::ATOM_NAME.raw(line)),
            symbol => symbol.to_string(),
        };
        if lookup_atomic_mass(&element).is_none() {
            debug!(
                line = line_num,
                element = %element,
                "Unrecognized element; assigning default atomic mass."
            );
            *metadata
                .unknown_elements
                .entry(element.to_ascii_uppercase())
                .or_insert(0) += 1;
        }

        builder
            .start_chain(chain_id)
            .start_residue(res_num, res_name, record_type == "HETATM");
        if let Some(atom) = builder.add_atom(serial, name, &element, Point3::new(x, y, z)) {
            atom.occupancy = parse_float_or(line, &columns::OCCUPANCY, atom.occupancy);
            atom.temperature_factor =
                parse_float_or(line, &columns::TEMPERATURE_FACTOR, atom.temperature_factor);
        }
        Ok(())
    }
}

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut builder = StructureBuilder::new();
        let mut metadata = PdbMetadata::default();
        let mut atom_count = 0usize;
        let mut first_model_done = false;
        let mut alt_locs = AltLocSeen::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match columns::RECORD_NAME.slice(&line) {
                "ATOM" | "HETATM" if !first_model_done => {
                    atom_count += 1;
                    Self::parse_atom_record(
                        &mut builder,
                        &mut metadata,
                        &mut alt_locs,
                        &line,
                        line_num,
                        atom_count,
                    )?;
                }
                "HEADER" => {
                    let id_code = columns::HEADER_ID_CODE.slice(&line);
                    if !id_code.is_empty() {
                        metadata.id_code = Some(id_code.to_string());
                    }
                }
                "MODEL" if first_model_done => metadata.skipped_models += 1,
                "ENDMDL" => first_model_done = true,
                "END" => break,
                _ => {}
            }
        }

        if atom_count == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        if metadata.skipped_models > 0 {
            debug!(
                skipped_models = metadata.skipped_models,
                "Only the first model was read."
            );
        }
        if metadata.skipped_alt_locs > 0 {
            debug!(
                skipped_alt_locs = metadata.skipped_alt_locs,
                "Kept the first alternate location of disordered atoms."
            );
        }

        let mut structure = builder.build();
        if let Some(id_code) = &metadata.id_code {
            structure.set_name(id_code);
        }
        Ok((structure, metadata))
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        if let Some(id_code) = &metadata.id_code {
            let mut header = RecordLine::new("HEADER");
            put(&mut header, &columns::HEADER_ID_CODE, id_code)?;
            writeln!(writer, "{}", header.finish())?;
        }
        for remark in &metadata.remarks {
            writeln!(writer, "REMARK   1 {}", remark)?;
        }

        for (_, chain) in structure.chains_iter() {
            let chain_str = chain.id.to_string();
            let mut last: Option<(usize, &str, isize)> = None;

            for &res_id in chain.residues() {
                let Some(residue) = structure.residue(res_id) else {
                    continue;
                };
                let record_name = if residue.hetero { "HETATM" } else { "ATOM" };
                let res_num = residue.residue_number.to_string();

                for &atom_id in residue.atoms() {
                    let Some(atom) = structure.atom(atom_id) else {
                        continue;
                    };
                    let mut record = RecordLine::new(record_name);
                    put(&mut record, &columns::SERIAL, &atom.serial.to_string())?;
                    put(
                        &mut record,
                        &columns::ATOM_NAME,
                        &padded_atom_name(&atom.name, &atom.element),
                    )?;
                    put(&mut record, &columns::RESIDUE_NAME, &residue.name)?;
                    put(&mut record, &columns::CHAIN_ID, &chain_str)?;
                    put(&mut record, &columns::RESIDUE_NUMBER, &res_num)?;
                    put(&mut record, &columns::X, &format!("{:.3}", atom.position.x))?;
                    put(&mut record, &columns::Y, &format!("{:.3}", atom.position.y))?;
                    put(&mut record, &columns::Z, &format!("{:.3}", atom.position.z))?;
                    put(&mut record, &columns::OCCUPANCY, &format!("{:.2}", atom.occupancy))?;
                    put(
                        &mut record,
                        &columns::TEMPERATURE_FACTOR,
                        &format!("{:.2}", atom.temperature_factor),
                    )?;
                    put(&mut record, &columns::ELEMENT, atom.element.trim())?;
                    writeln!(writer, "{}", record.finish())?;

                    last = Some((atom.serial, residue.name.as_str(), residue.residue_number));
                }
            }

            if let Some((serial, res_name, res_num)) = last {
                let mut ter = RecordLine::new("TER");
                put(&mut ter, &columns::SERIAL, &(serial + 1).to_string())?;
                put(&mut ter, &columns::RESIDUE_NAME, res_name)?;
                put(&mut ter, &columns::CHAIN_ID, &chain_str)?;
                put(&mut ter, &columns::RESIDUE_NUMBER, &res_num.to_string())?;
                writeln!(writer, "{}", ter.finish())?;
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }

    fn write_structure_to(
        structure: &Structure,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let default_metadata = PdbMetadata {
            remarks: vec![format!("Generated by ppinterface from '{}'", structure.name())],
            ..Default::default()
        };
        Self::write_to(structure, &default_metadata, writer)
    }

    /// Reads a PDB file, naming the structure after the HEADER id code or,
    /// when there is none, after the file stem.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError::NotFound`] if `path` does not exist.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Structure, Self::Metadata), Self::Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PdbError::NotFound {
                path: path.to_path_buf(),
            },
            _ => PdbError::Io(e),
        })?;

        let (mut structure, metadata) = Self::read_from(&mut BufReader::new(file))?;
        if metadata.id_code.is_none() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                structure.set_name(stem);
            }
        }
        Ok((structure, metadata))
    }
}
