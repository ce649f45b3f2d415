//! Presentation hints for external molecular viewers.
//!
//! Nothing here runs a viewer. The palette and selectors are plain data, and
//! [`PymolScript`] only renders script text for the caller to write wherever
//! it likes.

use crate::core::models::ids::ResidueKey;
use crate::core::models::structure::Structure;
use std::fmt::Write as _;

/// Chain colors, assigned cyclically in chain order.
pub const CHAIN_COLORS: [&str; 10] = [
    "red", "green", "blue", "yellow", "magenta", "cyan", "orange", "purple", "pink", "lime",
];

pub const BACKGROUND_COLOR: &str = "white";
pub const INTERFACE_COLOR: &str = "yellow";
pub const MUTATION_SITE_COLOR: &str = "red";

/// Color for the chain at position `index` in first-seen order.
pub fn chain_color(index: usize) -> &'static str {
    CHAIN_COLORS[index % CHAIN_COLORS.len()]
}

/// Chain identifier to color table for one structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainPalette {
    entries: Vec<(char, &'static str)>,
}

impl ChainPalette {
    pub fn for_chains<I: IntoIterator<Item = char>>(chains: I) -> Self {
        Self {
            entries: chains
                .into_iter()
                .enumerate()
                .map(|(idx, chain)| (chain, chain_color(idx)))
                .collect(),
        }
    }

    pub fn for_structure(structure: &Structure) -> Self {
        Self::for_chains(structure.chain_ids())
    }

    pub fn color_of(&self, chain: char) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(id, _)| *id == chain)
            .map(|(_, color)| *color)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn chain_term(chain: char) -> String {
    if chain == ' ' {
        "chain \"\"".to_string()
    } else {
        format!("chain {}", chain)
    }
}

fn resi_term(number: isize) -> String {
    // Leading minus signs must be escaped or the viewer reads a range.
    if number < 0 {
        format!("resi \\{}", number)
    } else {
        format!("resi {}", number)
    }
}

/// Selection expression for a single residue, e.g. `chain A and resi 12`.
pub fn residue_selector(key: &ResidueKey) -> String {
    format!("{} and {}", chain_term(key.chain_id), resi_term(key.residue_number))
}

/// Selection expression matching any of `keys`, e.g.
/// `(chain A and resi 12) or (chain B and resi 40)`.
///
/// Returns `None` when `keys` is empty, since an empty selection is not a
/// valid expression.
pub fn residues_selector<'k, I>(keys: I) -> Option<String>
where
    I: IntoIterator<Item = &'k ResidueKey>,
{
    let terms: Vec<String> = keys
        .into_iter()
        .map(|key| format!("({})", residue_selector(key)))
        .collect();
    (!terms.is_empty()).then(|| terms.join(" or "))
}

/// Line-oriented PyMOL command script.
#[derive(Debug, Clone, Default)]
pub struct PymolScript {
    lines: Vec<String>,
}

impl PymolScript {
    /// Starts a script that loads `structure_path` on a white background.
    pub fn new(structure_path: &str) -> Self {
        let mut script = Self::default();
        script.push(format!("load {}", structure_path));
        script.push(format!("bg_color {}", BACKGROUND_COLOR));
        script
    }

    fn push(&mut self, line: String) -> &mut Self {
        self.lines.push(line);
        self
    }

    pub fn show_cartoon(&mut self) -> &mut Self {
        self.push("show cartoon".to_string())
    }

    pub fn color_chains(&mut self, palette: &ChainPalette) -> &mut Self {
        for (chain, color) in palette.iter() {
            self.push(format!("color {}, {}", color, chain_term(chain)));
        }
        self
    }

    /// Defines a named selection, shows it as sticks and colors it.
    ///
    /// Empty key sets are skipped entirely.
    pub fn highlight<'k, I>(&mut self, name: &str, keys: I, color: &str) -> &mut Self
    where
        I: IntoIterator<Item = &'k ResidueKey>,
    {
        if let Some(selector) = residues_selector(keys) {
            self.push(format!("select {}, {}", name, selector));
            self.push(format!("show sticks, {}", name));
            self.push(format!("color {}, {}", color, name));
        }
        self
    }

    pub fn zoom(&mut self, target: Option<(&str, f64)>) -> &mut Self {
        match target {
            Some((name, buffer)) => self.push(format!("zoom {}, {}", name, buffer)),
            None => self.push("zoom".to_string()),
        }
    }

    pub fn save_image(&mut self, image_path: &str) -> &mut Self {
        self.push(format!("save {}", image_path))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let _ = writeln!(out, "{}", line);
        }
        out
    }
}

/// Script that colors every chain and highlights the interface residues.
pub fn interface_script<'k, I>(structure_path: &str, palette: &ChainPalette, interface: I) -> String
where
    I: IntoIterator<Item = &'k ResidueKey>,
{
    let mut script = PymolScript::new(structure_path);
    script
        .color_chains(palette)
        .show_cartoon()
        .highlight("interface", interface, INTERFACE_COLOR)
        .zoom(None);
    script.render()
}

/// Script that focuses on one mutation site in the context of the interface.
pub fn mutation_site_script<'k, I>(structure_path: &str, site: &ResidueKey, interface: I) -> String
where
    I: IntoIterator<Item = &'k ResidueKey>,
{
    let mut script = PymolScript::new(structure_path);
    script
        .show_cartoon()
        .highlight("interface", interface, INTERFACE_COLOR)
        .highlight("mutation_site", [site], MUTATION_SITE_COLOR)
        .zoom(Some(("mutation_site", 10.0)));
    script.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_through_ten_colors() {
        assert_eq!(chain_color(0), "red");
        assert_eq!(chain_color(9), "lime");
        assert_eq!(chain_color(10), "red");
        assert_eq!(chain_color(13), "yellow");
    }

    #[test]
    fn palette_follows_chain_order() {
        let palette = ChainPalette::for_chains(['H', 'L', 'A']);
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.color_of('H'), Some("red"));
        assert_eq!(palette.color_of('L'), Some("green"));
        assert_eq!(palette.color_of('A'), Some("blue"));
        assert_eq!(palette.color_of('Z'), None);
    }

    #[test]
    fn selector_joins_residues_with_or() {
        let keys = [ResidueKey::new('A', 12), ResidueKey::new('B', 40)];
        assert_eq!(
            residues_selector(&keys).as_deref(),
            Some("(chain A and resi 12) or (chain B and resi 40)")
        );
        assert_eq!(residues_selector(&[]), None);
    }

    #[test]
    fn selector_escapes_negative_numbers_and_blank_chains() {
        assert_eq!(
            residue_selector(&ResidueKey::new(' ', -3)),
            "chain \"\" and resi \\-3"
        );
    }

    #[test]
    fn interface_script_lists_commands_in_order() {
        let palette = ChainPalette::for_chains(['A', 'B']);
        let keys = [ResidueKey::new('A', 1)];
        let script = interface_script("complex.pdb", &palette, &keys);
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(
            lines,
            [
                "load complex.pdb",
                "bg_color white",
                "color red, chain A",
                "color green, chain B",
                "show cartoon",
                "select interface, (chain A and resi 1)",
                "show sticks, interface",
                "color yellow, interface",
                "zoom",
            ]
        );
    }

    #[test]
    fn empty_interface_skips_highlight() {
        let palette = ChainPalette::for_chains(['A']);
        let script = interface_script("x.pdb", &palette, &[]);
        assert!(!script.contains("select"));
        assert!(script.ends_with("zoom\n"));
    }

    #[test]
    fn mutation_script_zooms_on_site() {
        let site = ResidueKey::new('H', 52);
        let script = mutation_site_script("x.pdb", &site, &[site]);
        assert!(script.contains("select mutation_site, (chain H and resi 52)\n"));
        assert!(script.contains("color red, mutation_site\n"));
        assert!(script.ends_with("zoom mutation_site, 10\n"));
    }
}
