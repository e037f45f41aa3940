//! Multi-map progress tracking with automatic batching for large sets

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Loading state of one map
#[derive(Debug, Clone, PartialEq, Eq)]
enum MapState {
    Loading,
    Loaded { layers: usize, elapsed: Duration },
}

/// Coordinates progress display while maps load
///
/// Shows one line per map for small batches and adds a single batch bar for
/// large batches, keeping only the most recent maps on screen.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    map_bars: Vec<ProgressBar>,
    map_count: usize,
    /// Stores (`map name`, `state`) for rolling window display
    map_states: Vec<(String, MapState)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static MAP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Maps: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            map_bars: Vec::new(),
            map_count: 0,
            map_states: Vec::new(),
        }
    }

    /// Initialize progress lines based on map count
    pub fn initialize(&mut self, map_count: usize) {
        self.map_count = map_count;

        // Switch to batch mode for large map sets to avoid terminal spam
        if map_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(map_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = map_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new_spinner();
            pb.set_style(MAP_STYLE.clone());
            self.map_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of maps announced by [`ProgressManager::initialize`]
    pub const fn map_count(&self) -> usize {
        self.map_count
    }

    /// Number of maps marked loaded so far
    pub fn loaded_count(&self) -> usize {
        self.map_states
            .iter()
            .filter(|(_, state)| matches!(state, MapState::Loaded { .. }))
            .count()
    }

    /// Show a map as loading
    pub fn start_map(&mut self, index: usize, name: &str) {
        if index >= self.map_states.len() {
            self.map_states
                .resize(index + 1, (String::new(), MapState::Loading));
        }
        if let Some(state) = self.map_states.get_mut(index) {
            *state = (name.to_string(), MapState::Loading);
        }
        self.update_bars();
    }

    /// Mark a map as loaded and update batch progress
    pub fn complete_map(&mut self, index: usize, layers: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.map_states.get_mut(index) {
            state.1 = MapState::Loaded { layers, elapsed };
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message(format!(
                "{}/{} maps loaded",
                self.loaded_count(),
                self.map_count
            ));
        }
        for bar in &self.map_bars {
            bar.finish();
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress lines to show the last N active maps
    fn update_bars(&self) {
        let active_maps: Vec<_> = self
            .map_states
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .collect();

        let start_idx = active_maps
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_maps = active_maps.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, state)) in visible_maps.iter().enumerate() {
            if let Some(bar) = self.map_bars.get(bar_idx) {
                match state {
                    MapState::Loading => {
                        bar.set_prefix(name.clone());
                        bar.set_message("loading");
                        bar.tick();
                    }
                    MapState::Loaded { layers, elapsed } => {
                        bar.set_prefix(format!("✓ {name}"));
                        bar.set_message(format!(
                            "{layers} collision layer(s) in {}ms",
                            elapsed.as_millis()
                        ));
                    }
                }
            }
        }

        // Clear any unused lines
        for bar_idx in visible_maps.len()..self.map_bars.len() {
            if let Some(bar) = self.map_bars.get(bar_idx) {
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
