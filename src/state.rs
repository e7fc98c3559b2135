use crate::data::filter::{self, FilterCriterion, Selection};
use crate::data::loader;
use crate::data::model::{ClusterModel, Dataset, ValidatedDataset};
use crate::data::summary::{self, FrequencyTable};

// ---------------------------------------------------------------------------
// View modes
// ---------------------------------------------------------------------------

/// The closed set of views the dashboard supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// One model drives coloring and filtering.
    Single(ClusterModel),
    /// Both models side by side. Filtering is disabled in this mode.
    Compare,
    /// Exactly one cluster of one model; the wildcard is not offered.
    DrillDown(ClusterModel),
}

impl ViewMode {
    /// The model whose column drives coloring and filtering, if any.
    pub fn active_model(self) -> Option<ClusterModel> {
        match self {
            ViewMode::Single(model) | ViewMode::DrillDown(model) => Some(model),
            ViewMode::Compare => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. All derived data is a pure
/// function of (dataset, mode, selections); only the filtered index list is
/// cached here.
pub struct AppState {
    /// Gate result of the last successful upload (None until one arrives).
    pub data: Option<ValidatedDataset>,

    /// Active view.
    pub mode: ViewMode,

    /// Per-model filter selections; reset on upload and on mode switches.
    pub kmeans_selection: Selection,
    pub dbscan_selection: Selection,

    /// Row indices passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            data: None,
            mode: ViewMode::Single(ClusterModel::KMeans),
            kmeans_selection: Selection::All,
            dbscan_selection: Selection::All,
            visible_indices: Vec::new(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// The renderable dataset, if the last upload passed the gate.
    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.data {
            Some(ValidatedDataset::Ready(dataset)) => Some(dataset),
            _ => None,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.dataset().map_or(0, Dataset::len)
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_indices.len()
    }

    pub fn selection(&self, model: ClusterModel) -> &Selection {
        match model {
            ClusterModel::KMeans => &self.kmeans_selection,
            ClusterModel::Dbscan => &self.dbscan_selection,
        }
    }

    fn selection_mut(&mut self, model: ClusterModel) -> &mut Selection {
        match model {
            ClusterModel::KMeans => &mut self.kmeans_selection,
            ClusterModel::Dbscan => &mut self.dbscan_selection,
        }
    }

    /// Ingest raw upload bytes. A rejected upload leaves whatever was loaded
    /// before untouched; only the status line changes.
    pub fn ingest(&mut self, raw: &[u8]) {
        self.loading = true;
        match loader::load(raw) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} rows with columns {:?}",
                    dataset.len(),
                    dataset.columns
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("upload rejected: {e}");
                self.status_message = Some(e.to_string());
                self.loading = false;
            }
        }
    }

    /// Install a freshly parsed dataset: run the gate, reset selections,
    /// recompute the visible set.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.kmeans_selection = Selection::All;
        self.dbscan_selection = Selection::All;
        self.status_message = None;
        self.loading = false;

        match dataset.validate() {
            ValidatedDataset::Ready(dataset) => {
                self.data = Some(ValidatedDataset::Ready(dataset));
                self.ensure_drilldown_selection();
                self.refilter();
            }
            incomplete => {
                if let ValidatedDataset::Incomplete { missing } = &incomplete {
                    log::warn!("upload not renderable, missing columns {missing:?}");
                }
                self.data = Some(incomplete);
                self.visible_indices.clear();
            }
        }
    }

    /// Switch views. Selections for columns the new mode cannot filter on
    /// revert to the wildcard.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;

        match mode.active_model() {
            Some(ClusterModel::KMeans) => self.dbscan_selection = Selection::All,
            Some(ClusterModel::Dbscan) => self.kmeans_selection = Selection::All,
            None => {
                self.kmeans_selection = Selection::All;
                self.dbscan_selection = Selection::All;
            }
        }

        self.ensure_drilldown_selection();
        self.refilter();
    }

    /// Record a user selection for one model and recompute the visible set.
    pub fn set_selection(&mut self, model: ClusterModel, selection: Selection) {
        *self.selection_mut(model) = selection;
        self.refilter();
    }

    /// Criteria implied by the current mode and selections.
    pub fn active_criteria(&self) -> Vec<FilterCriterion> {
        match self.mode.active_model() {
            None => Vec::new(),
            Some(model) => vec![FilterCriterion {
                column: model.column().to_string(),
                selection: self.selection(model).clone(),
            }],
        }
    }

    /// Recompute the cached visible indices from the current criteria.
    pub fn refilter(&mut self) {
        let criteria = self.active_criteria();
        let visible = match self.dataset() {
            Some(dataset) => filter::apply(dataset, &criteria),
            None => Vec::new(),
        };
        self.visible_indices = visible;
    }

    /// Per-cluster counts of the currently visible rows for one model.
    pub fn frequency(&self, model: ClusterModel) -> FrequencyTable {
        match self.dataset() {
            Some(dataset) => summary::counts(dataset, &self.visible_indices, model.column()),
            None => FrequencyTable::default(),
        }
    }

    /// Whether the loaded dataset carries this model's column.
    pub fn model_available(&self, model: ClusterModel) -> bool {
        self.dataset()
            .is_some_and(|dataset| dataset.has_column(model.column()))
    }

    /// Drill-down forbids the wildcard; pick the first label when entering
    /// the mode (or after an upload) left the selection open.
    fn ensure_drilldown_selection(&mut self) {
        let ViewMode::DrillDown(model) = self.mode else {
            return;
        };
        if !self.selection(model).is_all() {
            return;
        }
        let first = self
            .dataset()
            .and_then(|dataset| filter::distinct_labels(dataset, model.column()).into_iter().next());
        if let Some(label) = first {
            *self.selection_mut(model) = Selection::Label(label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_CSV: &[u8] = b"latitude,longitude,cluster,dbscan_cluster\n\
                              -6.2,106.8,0,0\n\
                              -6.9,107.6,1,-1\n\
                              -7.8,110.4,1,0\n\
                              0.8,122.5,2,1\n";

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.ingest(GOOD_CSV);
        state
    }

    #[test]
    fn ingest_makes_all_rows_visible() {
        let state = loaded();
        assert_eq!(state.total_rows(), 4);
        assert_eq!(state.visible_rows(), 4);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_parse_preserves_previous_dataset() {
        let mut state = loaded();
        state.set_selection(ClusterModel::KMeans, Selection::Label("1".into()));
        state.ingest(b"latitude,longitude\n1.0\n");

        assert!(state.status_message.is_some());
        assert_eq!(state.total_rows(), 4);
        // The in-flight filter state survives too.
        assert_eq!(state.visible_rows(), 2);
    }

    #[test]
    fn selection_narrows_visible_rows() {
        let mut state = loaded();
        state.set_selection(ClusterModel::KMeans, Selection::Label("1".into()));
        assert_eq!(state.visible_indices, [1, 2]);

        state.set_selection(ClusterModel::KMeans, Selection::All);
        assert_eq!(state.visible_rows(), 4);
    }

    #[test]
    fn mode_switch_resets_inapplicable_selection() {
        let mut state = loaded();
        state.set_selection(ClusterModel::KMeans, Selection::Label("1".into()));

        state.set_mode(ViewMode::Single(ClusterModel::Dbscan));
        assert_eq!(state.kmeans_selection, Selection::All);
        assert_eq!(state.visible_rows(), 4);
    }

    #[test]
    fn compare_mode_disables_filtering() {
        let mut state = loaded();
        state.set_selection(ClusterModel::KMeans, Selection::Label("2".into()));
        assert_eq!(state.visible_rows(), 1);

        state.set_mode(ViewMode::Compare);
        assert!(state.active_criteria().is_empty());
        assert_eq!(state.visible_rows(), 4);
    }

    #[test]
    fn drilldown_auto_selects_first_label() {
        let mut state = loaded();
        state.set_mode(ViewMode::DrillDown(ClusterModel::Dbscan));
        assert_eq!(state.dbscan_selection, Selection::Label("0".into()));
        assert_eq!(state.visible_indices, [0, 2]);
    }

    #[test]
    fn new_upload_resets_selections() {
        let mut state = loaded();
        state.set_selection(ClusterModel::KMeans, Selection::Label("1".into()));
        state.ingest(GOOD_CSV);
        assert_eq!(state.kmeans_selection, Selection::All);
        assert_eq!(state.visible_rows(), 4);
    }

    #[test]
    fn incomplete_upload_shows_no_rows() {
        let mut state = AppState::default();
        state.ingest(b"latitude,depth\n1.0,10.0\n");
        assert!(state.dataset().is_none());
        assert!(matches!(
            state.data,
            Some(ValidatedDataset::Incomplete { .. })
        ));
        assert_eq!(state.visible_rows(), 0);
    }

    #[test]
    fn frequency_follows_visible_rows() {
        let mut state = loaded();
        let table = state.frequency(ClusterModel::KMeans);
        assert_eq!(table.count_for("1"), 2);
        assert_eq!(table.total(), 4);

        state.set_selection(ClusterModel::KMeans, Selection::Label("1".into()));
        let table = state.frequency(ClusterModel::KMeans);
        assert_eq!(table.count_for("1"), 2);
        assert_eq!(table.total(), 2);
    }
}
