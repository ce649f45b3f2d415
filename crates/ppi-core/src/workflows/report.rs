//! CSV export of interface analysis results.

use crate::core::models::ids::ResidueKey;
use crate::core::models::structure::Structure;
use crate::engine::tasks::contacts::ResidueContact;
use crate::workflows::interface::MutationProposal;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

pub const RESIDUE_HEADERS: [&str; 3] = ["chain", "residue_number", "residue_name"];
pub const CONTACT_HEADERS: [&str; 5] = ["chain_a", "residue_a", "chain_b", "residue_b", "min_distance"];
pub const SUGGESTION_HEADERS: [&str; 5] = [
    "chain",
    "residue_number",
    "original",
    "suggested",
    "rationale",
];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("CSV writing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

#[derive(Serialize)]
struct ResidueRow<'a> {
    chain: char,
    residue_number: isize,
    residue_name: &'a str,
}

#[derive(Serialize)]
struct ContactRow {
    chain_a: char,
    residue_a: isize,
    chain_b: char,
    residue_b: isize,
    min_distance: String,
}

#[derive(Serialize)]
struct SuggestionRow<'a> {
    chain: char,
    residue_number: isize,
    original: &'a str,
    suggested: &'a str,
    rationale: &'a str,
}

fn csv_writer<W: Write>(writer: W, headers: &[&str]) -> Result<csv::Writer<W>, csv::Error> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(headers)?;
    Ok(csv)
}

/// Writes one row per interface residue, naming each from `structure`.
///
/// Keys absent from `structure` get an empty residue name.
pub fn write_residues<W: Write>(
    writer: W,
    structure: &Structure,
    residues: &BTreeSet<ResidueKey>,
) -> Result<(), csv::Error> {
    let mut csv = csv_writer(writer, &RESIDUE_HEADERS)?;
    for key in residues {
        let name = structure
            .find_residue_by_key(key)
            .and_then(|id| structure.residue(id))
            .map(|residue| residue.name.trim())
            .unwrap_or("");
        csv.serialize(ResidueRow {
            chain: key.chain_id,
            residue_number: key.residue_number,
            residue_name: name,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes one row per contacting residue pair; distances use three decimals.
pub fn write_contacts<W: Write>(writer: W, contacts: &[ResidueContact]) -> Result<(), csv::Error> {
    let mut csv = csv_writer(writer, &CONTACT_HEADERS)?;
    for contact in contacts {
        csv.serialize(ContactRow {
            chain_a: contact.residue_a.chain_id,
            residue_a: contact.residue_a.residue_number,
            chain_b: contact.residue_b.chain_id,
            residue_b: contact.residue_b.residue_number,
            min_distance: format!("{:.3}", contact.min_distance),
        })?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_suggestions<W: Write>(
    writer: W,
    suggestions: &[MutationProposal],
) -> Result<(), csv::Error> {
    let mut csv = csv_writer(writer, &SUGGESTION_HEADERS)?;
    for proposal in suggestions {
        csv.serialize(SuggestionRow {
            chain: proposal.key.chain_id,
            residue_number: proposal.key.residue_number,
            original: &proposal.original,
            suggested: proposal.suggested,
            rationale: proposal.rationale,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and hands a buffered writer to `write`.
pub fn write_to_path<F>(path: &Path, write: F) -> Result<(), ReportError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), csv::Error>,
{
    let display = path.to_string_lossy().to_string();
    let file = File::create(path).map_err(|e| ReportError::Io {
        path: display.clone(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).map_err(|e| ReportError::Csv {
        path: display.clone(),
        source: e,
    })?;
    writer.flush().map_err(|e| ReportError::Io {
        path: display,
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::StructureBuilder;
    use nalgebra::Point3;
    use std::fs;
    use tempfile::tempdir;

    fn structure() -> Structure {
        let mut builder = StructureBuilder::new();
        builder.start_chain('A');
        builder.start_residue(12, "SER", false);
        builder.add_atom(1, "OG", "O", Point3::origin());
        builder.start_chain('B');
        builder.start_residue(-2, "LYS", false);
        builder.add_atom(2, "NZ", "N", Point3::new(3.0, 0.0, 0.0));
        builder.build()
    }

    fn to_string(write: impl FnOnce(&mut Vec<u8>) -> Result<(), csv::Error>) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn residues_table_names_each_residue() {
        let structure = structure();
        let residues: BTreeSet<ResidueKey> = [
            ResidueKey::new('B', -2),
            ResidueKey::new('A', 12),
            ResidueKey::new('C', 1),
        ]
        .into_iter()
        .collect();
        let out = to_string(|w| write_residues(w, &structure, &residues));
        assert_eq!(
            out,
            "chain,residue_number,residue_name\nA,12,SER\nB,-2,LYS\nC,1,\n"
        );
    }

    #[test]
    fn contacts_table_rounds_distances() {
        let contacts = [ResidueContact {
            residue_a: ResidueKey::new('A', 12),
            residue_b: ResidueKey::new('B', -2),
            min_distance: 3.14159,
            atom_pairs: 1,
        }];
        let out = to_string(|w| write_contacts(w, &contacts));
        assert_eq!(
            out,
            "chain_a,residue_a,chain_b,residue_b,min_distance\nA,12,B,-2,3.142\n"
        );
    }

    #[test]
    fn suggestions_table_quotes_nothing_unnecessarily() {
        let proposals = [MutationProposal {
            key: ResidueKey::new('A', 12),
            original: "SER".to_string(),
            suggested: "TYR",
            rationale: "Replacing small residue with larger aromatic to increase contacts",
        }];
        let out = to_string(|w| write_suggestions(w, &proposals));
        assert_eq!(
            out,
            "chain,residue_number,original,suggested,rationale\n\
             A,12,SER,TYR,Replacing small residue with larger aromatic to increase contacts\n"
        );
    }

    #[test]
    fn empty_tables_still_have_headers() {
        let out = to_string(|w| write_contacts(w, &[]));
        assert_eq!(out, "chain_a,residue_a,chain_b,residue_b,min_distance\n");
    }

    #[test]
    fn write_to_path_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("suggestions.csv");
        write_to_path(&path, |w| write_suggestions(w, &[])).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "chain,residue_number,original,suggested,rationale\n");
    }

    #[test]
    fn write_to_path_reports_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_to_path(&path, |w| write_suggestions(w, &[])).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
