//! Report page captions and export recipes.

use serde::{Deserialize, Serialize};

use crate::fields::ResultSelection;
use crate::plate::Plate;

pub const NO_DATA_TEXT: &str = "No data in table";

/// Caption strings of one report sheet. The page template itself belongs to
/// the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPage {
    pub load_title: String,
    pub mosaic_title: String,
    pub units_title: String,
    pub figure_caption: String,
    pub sheet_number: String,
    /// Shown in the figure area instead of the mosaic when non-empty.
    pub no_data_text: String,
}

impl Default for ReportPage {
    fn default() -> Self {
        Self {
            load_title: "Snow".to_string(),
            mosaic_title: "Mosaic of My".to_string(),
            units_title: "Units: t*m/m".to_string(),
            figure_caption: "Fig. 1 ...".to_string(),
            sheet_number: "1".to_string(),
            no_data_text: String::new(),
        }
    }
}

impl ReportPage {
    /// Captions for a moment/displacement sheet in the layout used by the queue builders.
    pub fn for_selection(load_title: impl Into<String>, selection: &ResultSelection) -> Self {
        let (mosaic_title, units_title) = match selection {
            ResultSelection::Moments { field, .. } => {
                (format!("Mosaic of {field}"), "Units: t*m/m".to_string())
            }
            ResultSelection::Displacements { field, .. } => {
                (format!("Displacements {field}"), "Units: mm".to_string())
            }
        };
        Self {
            load_title: load_title.into(),
            mosaic_title,
            units_title,
            ..Self::default()
        }
    }

    pub fn with_sheet_number(&self, sheet: u32) -> Self {
        Self {
            sheet_number: sheet.to_string(),
            ..self.clone()
        }
    }

    pub fn has_no_data(&self) -> bool {
        !self.no_data_text.trim().is_empty()
    }
}

/// One queued sheet: what to draw, never the drawn scene itself.
///
/// The scene is rebuilt from cached tables at export time, keeping the queue
/// small and independent of whatever the preview currently shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSheetItem {
    pub plate: Plate,
    pub selection: ResultSelection,
    pub lc_name: String,
    pub page: ReportPage,
    pub show_mesh: bool,
    /// Reason the sheet is known to have no data when it was queued.
    pub no_data: Option<String>,
}

impl ExportSheetItem {
    pub fn plate_title(&self) -> &str {
        &self.plate.key
    }

    pub fn is_no_data(&self) -> bool {
        self.no_data.is_some()
    }

    /// Short line for queue listings, e.g. `LC=2 Floor | Z=-0.30 | Moments: My`.
    pub fn display_line(&self) -> String {
        let id = match self.selection {
            ResultSelection::Moments { lc, .. } => format!("LC={lc}"),
            ResultSelection::Displacements { rsn, .. } => format!("RSN={rsn}"),
        };
        format!(
            "{} {} | {} | {}: {}",
            id,
            self.lc_name,
            self.plate_title(),
            self.selection.kind_title(),
            self.selection.field_name()
        )
    }

    /// File name for per-sheet export, e.g. `Sheet_005__LC2_Floor__Z=-0.30__Moments_My.pdf`.
    pub fn suggested_file_name(&self, sheet: u32) -> String {
        let id = match self.selection {
            ResultSelection::Moments { lc, .. } => format!("LC{}", make_safe(&format!("{lc}_{}", self.lc_name))),
            ResultSelection::Displacements { rsn, .. } => {
                format!("RSN{}", make_safe(&format!("{rsn}_{}", self.lc_name)))
            }
        };
        format!(
            "Sheet_{sheet:03}__{id}__{}__{}_{}.pdf",
            make_safe(self.plate_title()),
            self.selection.kind_title(),
            self.selection.field_name()
        )
    }
}

fn make_safe(s: &str) -> String {
    if s.trim().is_empty() {
        return "NA".to_string();
    }
    s.chars()
        .map(|c| if is_invalid_file_char(c) || c == ' ' { '_' } else { c })
        .collect()
}

fn is_invalid_file_char(c: char) -> bool {
    c.is_control() || matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{DisplacementField, MomentField};

    fn item(selection: ResultSelection, lc_name: &str) -> ExportSheetItem {
        ExportSheetItem {
            plate: Plate::new("Z=-0.30", "geom_Z=-0.30.csv"),
            selection,
            lc_name: lc_name.to_string(),
            page: ReportPage::default(),
            show_mesh: true,
            no_data: None,
        }
    }

    #[test]
    fn suggested_file_name_for_moments() {
        let it = item(
            ResultSelection::Moments {
                lc: 2,
                field: MomentField::My,
            },
            "Floor load",
        );
        assert_eq!(
            it.suggested_file_name(5),
            "Sheet_005__LC2_Floor_load__Z=-0.30__Moments_My.pdf"
        );
        assert_eq!(it.display_line(), "LC=2 Floor load | Z=-0.30 | Moments: My");
    }

    #[test]
    fn suggested_file_name_replaces_invalid_characters() {
        let mut it = item(
            ResultSelection::Displacements {
                rsn: 3,
                field: DisplacementField::Uz,
            },
            "a/b",
        );
        it.plate.key = "k:1".to_string();
        assert_eq!(
            it.suggested_file_name(12),
            "Sheet_012__RSN3_a_b__k_1__Displacements_Uz.pdf"
        );
    }

    #[test]
    fn blank_components_become_na() {
        assert_eq!(make_safe("  "), "NA");
        assert_eq!(make_safe("x y"), "x_y");
    }

    #[test]
    fn page_for_selection_and_sheet_number() {
        let page = ReportPage::for_selection(
            "Wind",
            &ResultSelection::Moments {
                lc: 1,
                field: MomentField::Mx,
            },
        );
        assert_eq!(page.mosaic_title, "Mosaic of Mx");
        let numbered = page.with_sheet_number(7);
        assert_eq!(numbered.sheet_number, "7");
        assert_eq!(numbered.load_title, "Wind");
        assert!(!numbered.has_no_data());
    }
}
