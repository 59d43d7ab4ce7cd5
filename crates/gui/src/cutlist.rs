//! Cut-list aggregation: a pure reduction over the entity list, grouped by
//! catalog profile.

use serde::Serialize;

use shared::{board_feet, resolve_profile, resolve_species, Entity};

use crate::units::round_to;

/// One aggregated row of the cut list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutListRow {
    pub profile_id: String,
    pub label: String,
    pub species: String,
    pub count: usize,
    /// Summed over all pieces in the group, rounded to 2 decimals
    pub board_feet: f64,
    /// Scaled stock length of the first piece seen in the group. Pieces
    /// with a different z-scale are not reflected here; see DESIGN.md
    /// before changing this.
    pub length_inches: f64,
}

/// Aggregate the entity list into cut-list rows, grouped by profile id in
/// first-seen order. Entities with an unknown profile are skipped.
pub fn generate_cut_list(entities: &[Entity]) -> Vec<CutListRow> {
    let mut rows: Vec<CutListRow> = Vec::new();

    for entity in entities {
        let Some(profile) = resolve_profile(&entity.profile_id) else {
            continue;
        };
        let piece_board_feet = board_feet(profile, entity.transform.scale);

        match rows.iter_mut().find(|row| row.profile_id == profile.id) {
            Some(row) => {
                row.count += 1;
                row.board_feet += piece_board_feet;
            }
            None => {
                let species = resolve_species(profile.species);
                rows.push(CutListRow {
                    profile_id: profile.id.to_string(),
                    label: profile.label.to_string(),
                    species: species.label.to_string(),
                    count: 1,
                    board_feet: piece_board_feet,
                    length_inches: profile.size_inches.length * entity.transform.scale[2],
                });
            }
        }
    }

    for row in &mut rows {
        row.board_feet = round_to(row.board_feet, 2);
    }
    rows
}

/// Total board feet across all rows
pub fn total_board_feet(rows: &[CutListRow]) -> f64 {
    round_to(rows.iter().map(|row| row.board_feet).sum(), 2)
}

/// Render the cut list as a JSON document for export
pub fn export_json(entities: &[Entity]) -> String {
    let rows = generate_cut_list(entities);
    serde_json::to_string_pretty(&serde_json::json!({ "cut_list": rows })).unwrap_or_default()
}

/// Render the cut list as CSV for spreadsheet import
pub fn export_csv(entities: &[Entity]) -> String {
    let mut out = String::from("profile,label,species,count,board_feet,length_inches\n");
    for row in generate_cut_list(entities) {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            row.profile_id,
            csv_field(&row.label),
            csv_field(&row.species),
            row.count,
            row.board_feet,
            row.length_inches,
        ));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
