//! Ordered list of sheets waiting for export.

use std::collections::BTreeSet;

use mosaic_model::{
    ExportSheetItem, LoadCaseItem, MomentField, MomentsTable, NO_DATA_TEXT, Plate, ReportPage,
    ResultSelection,
};
use serde::{Deserialize, Serialize};

pub const NO_MOMENTS_REASON: &str = "No data in moments";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportQueue {
    items: Vec<ExportSheetItem>,
}

impl ExportQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ExportSheetItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Snapshot handed to the exporter so later queue edits do not affect it.
    pub fn to_vec(&self) -> Vec<ExportSheetItem> {
        self.items.clone()
    }

    pub fn push(&mut self, item: ExportSheetItem) {
        self.items.push(item);
    }

    /// Queues the sheet currently shown in a preview. The sheet is flagged as
    /// having no data when the preview had no scene or showed a no-data text.
    pub fn add_current(
        &mut self,
        plate: &Plate,
        load_case: &LoadCaseItem,
        field: MomentField,
        page: ReportPage,
        has_scene: bool,
        show_mesh: bool,
    ) {
        let no_data = (!has_scene || page.has_no_data()).then(|| page.no_data_text.clone());
        self.items.push(ExportSheetItem {
            plate: plate.clone(),
            selection: ResultSelection::Moments {
                lc: load_case.lc,
                field,
            },
            lc_name: load_case.name.clone(),
            page,
            show_mesh,
            no_data,
        });
    }

    /// Queues one moment sheet per load case, in LC order. Load cases
    /// missing from `moments` are queued with a no-data page.
    pub fn add_all_load_cases(
        &mut self,
        plate: &Plate,
        load_cases: &[LoadCaseItem],
        field: MomentField,
        moments: &MomentsTable,
        show_mesh: bool,
    ) -> usize {
        let mut ordered: Vec<&LoadCaseItem> = load_cases.iter().collect();
        ordered.sort_by_key(|item| item.lc);

        for load_case in &ordered {
            let selection = ResultSelection::Moments {
                lc: load_case.lc,
                field,
            };
            let has_data = moments.contains_lc(load_case.lc);

            let mut page = ReportPage::for_selection(load_case.name.clone(), &selection);
            if !has_data {
                page.no_data_text = NO_DATA_TEXT.to_string();
            }

            self.items.push(ExportSheetItem {
                plate: plate.clone(),
                selection,
                lc_name: load_case.name.clone(),
                page,
                show_mesh,
                no_data: (!has_data).then(|| NO_MOMENTS_REASON.to_string()),
            });
        }
        ordered.len()
    }

    /// Removes the given positions; out-of-range positions are ignored.
    pub fn remove(&mut self, positions: &[usize]) -> usize {
        let doomed: BTreeSet<usize> = positions.iter().copied().collect();
        let before = self.items.len();
        let mut index = 0;
        self.items.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });
        before - self.items.len()
    }

    /// Moves the selected positions one step towards the front as a group.
    /// Items already blocked at the front stay put. Returns the new positions.
    pub fn move_up(&mut self, positions: &[usize]) -> Vec<usize> {
        let selected = self.valid_positions(positions);
        let mut moved = Vec::with_capacity(selected.len());
        let mut floor = 0;
        for i in selected {
            if i > floor {
                self.items.swap(i - 1, i);
                moved.push(i - 1);
                floor = i;
            } else {
                moved.push(i);
                floor = i + 1;
            }
        }
        moved
    }

    /// Moves the selected positions one step towards the back as a group.
    pub fn move_down(&mut self, positions: &[usize]) -> Vec<usize> {
        let selected = self.valid_positions(positions);
        let mut moved = Vec::with_capacity(selected.len());
        let mut ceiling = self.items.len();
        for i in selected.into_iter().rev() {
            if i + 1 < ceiling {
                self.items.swap(i, i + 1);
                moved.push(i + 1);
                ceiling = i + 1;
            } else {
                moved.push(i);
                ceiling = i;
            }
        }
        moved.reverse();
        moved
    }

    fn valid_positions(&self, positions: &[usize]) -> BTreeSet<usize> {
        positions
            .iter()
            .copied()
            .filter(|&i| i < self.items.len())
            .collect()
    }
}

impl IntoIterator for ExportQueue {
    type Item = ExportSheetItem;
    type IntoIter = std::vec::IntoIter<ExportSheetItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_model::MomentValues;

    fn plate() -> Plate {
        Plate::new("Z=0", "geom_Z=0.csv")
    }

    fn queue_of(lcs: &[i32]) -> ExportQueue {
        let mut queue = ExportQueue::new();
        let cases: Vec<LoadCaseItem> = lcs
            .iter()
            .map(|&lc| LoadCaseItem::new(lc, format!("case {lc}")))
            .collect();
        let mut table = MomentsTable::new();
        for &lc in lcs {
            table.add(1, lc, MomentValues::default());
        }
        queue.add_all_load_cases(&plate(), &cases, MomentField::My, &table, true);
        queue
    }

    fn lcs(queue: &ExportQueue) -> Vec<i32> {
        queue
            .items()
            .iter()
            .map(|item| match item.selection {
                ResultSelection::Moments { lc, .. } => lc,
                ResultSelection::Displacements { rsn, .. } => rsn,
            })
            .collect()
    }

    #[test]
    fn all_load_cases_are_ordered_and_flag_missing_data() {
        let mut table = MomentsTable::new();
        table.add(1, 2, MomentValues::default());
        let cases = vec![LoadCaseItem::new(3, "Wind"), LoadCaseItem::new(2, "Snow")];

        let mut queue = ExportQueue::new();
        let added = queue.add_all_load_cases(&plate(), &cases, MomentField::Mx, &table, false);

        assert_eq!(added, 2);
        assert_eq!(lcs(&queue), vec![2, 3]);

        let snow = &queue.items()[0];
        assert!(!snow.is_no_data());
        assert_eq!(snow.page.load_title, "Snow");
        assert_eq!(snow.page.mosaic_title, "Mosaic of Mx");
        assert!(!snow.page.has_no_data());

        let wind = &queue.items()[1];
        assert_eq!(wind.no_data.as_deref(), Some(NO_MOMENTS_REASON));
        assert_eq!(wind.page.no_data_text, NO_DATA_TEXT);
        assert!(!wind.show_mesh);
    }

    #[test]
    fn current_sheet_without_scene_is_no_data() {
        let mut queue = ExportQueue::new();
        let lc = LoadCaseItem::new(1, "Dead");
        queue.add_current(&plate(), &lc, MomentField::My, ReportPage::default(), false, true);
        queue.add_current(&plate(), &lc, MomentField::My, ReportPage::default(), true, true);

        assert!(queue.items()[0].is_no_data());
        assert!(!queue.items()[1].is_no_data());
    }

    #[test]
    fn remove_ignores_out_of_range_positions() {
        let mut queue = queue_of(&[1, 2, 3, 4]);
        assert_eq!(queue.remove(&[3, 1, 9, 1]), 2);
        assert_eq!(lcs(&queue), vec![1, 3]);
    }

    #[test]
    fn move_up_shifts_group_and_keeps_blocked_items() {
        let mut queue = queue_of(&[1, 2, 3, 4, 5]);
        assert_eq!(queue.move_up(&[2, 3]), vec![1, 2]);
        assert_eq!(lcs(&queue), vec![1, 3, 4, 2, 5]);

        assert_eq!(queue.move_up(&[0, 1, 3]), vec![0, 1, 2]);
        assert_eq!(lcs(&queue), vec![1, 3, 2, 4, 5]);
    }

    #[test]
    fn move_down_shifts_group_and_keeps_blocked_items() {
        let mut queue = queue_of(&[1, 2, 3, 4, 5]);
        assert_eq!(queue.move_down(&[1, 2]), vec![2, 3]);
        assert_eq!(lcs(&queue), vec![1, 4, 2, 3, 5]);

        assert_eq!(queue.move_down(&[4, 3, 0]), vec![1, 3, 4]);
        assert_eq!(lcs(&queue), vec![4, 1, 2, 3, 5]);
    }

    #[test]
    fn queue_serializes_as_item_list() {
        let queue = queue_of(&[1]);
        let json = serde_json::to_value(&queue).expect("serialize");
        assert!(json.is_array());
        let back: ExportQueue = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, queue);
    }
}
