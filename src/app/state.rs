use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use eframe::App as EApp;
use egui::TextureHandle;
use log::debug;

use crate::analysis::{
    aggregate_performance_with, categories, filter_prompts, format_chart_data, process_pie_data,
    OverviewStats,
};
use crate::config::Config;
use crate::data::PromptProvider;
use crate::plotting::{ChartStyle, RenderedChart};
use crate::types::{
    AggregatedRecord, ChartType, DisplayRecord, PieBucket, Prompt, PromptId, UserInfo,
};

/// How the prompt collection is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Everything the dashboard shows that is not a texture.
///
/// All selectors are independent and any value may follow any other.
pub struct DashboardState {
    provider: Box<dyn PromptProvider>,
    combined: Vec<AggregatedRecord>,
    chart_type: ChartType,
    active_prompt: Option<PromptId>,
    search_term: String,
    selected_category: Option<String>,
    view_mode: ViewMode,
    expanded_categories: BTreeSet<String>,
    update_needed: bool,
}

impl DashboardState {
    pub fn new(provider: Box<dyn PromptProvider>, config: &Config) -> Self {
        let combined = aggregate_performance_with(provider.prompts(), config.averaging);
        let expanded_categories = categories(provider.prompts()).into_iter().collect();
        debug!(
            "Dashboard state created with {} prompts and {} combined days",
            provider.prompts().len(),
            combined.len()
        );

        Self {
            provider,
            combined,
            chart_type: config.default_chart_type,
            active_prompt: None,
            search_term: String::new(),
            selected_category: None,
            view_mode: ViewMode::default(),
            expanded_categories,
            update_needed: true,
        }
    }

    pub fn user(&self) -> &UserInfo {
        self.provider.user()
    }

    pub fn prompts(&self) -> &[Prompt] {
        self.provider.prompts()
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        if self.chart_type != chart_type {
            self.chart_type = chart_type;
            self.update_needed = true;
        }
    }

    /// The prompt whose detail view is open. An id that is not in the
    /// dataset resolves to `None`, which shows the dashboard.
    pub fn active_prompt(&self) -> Option<&Prompt> {
        self.active_prompt
            .as_ref()
            .and_then(|id| self.provider.find(id))
    }

    pub fn select_prompt(&mut self, id: PromptId) {
        if self.active_prompt.as_ref() != Some(&id) {
            debug!("Opening prompt {}", id);
            self.active_prompt = Some(id);
            self.update_needed = true;
        }
    }

    pub fn back_to_dashboard(&mut self) {
        if self.active_prompt.take().is_some() {
            self.update_needed = true;
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    /// `None` selects every category.
    pub fn select_category(&mut self, category: Option<String>) {
        self.selected_category = category;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn is_expanded(&self, category: &str) -> bool {
        self.expanded_categories.contains(category)
    }

    /// Collapse an expanded sidebar group or expand a collapsed one.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.expanded_categories.remove(category) {
            self.expanded_categories.insert(category.to_string());
        }
    }

    pub fn categories(&self) -> Vec<String> {
        categories(self.provider.prompts())
    }

    /// Prompts matching the current search term and category.
    pub fn visible_prompts(&self) -> Vec<&Prompt> {
        filter_prompts(
            self.provider.prompts(),
            &self.search_term,
            self.selected_category.as_deref(),
        )
    }

    pub fn overview(&self) -> OverviewStats {
        OverviewStats::from_prompts(self.provider.prompts())
    }

    /// Daily performance across all prompts.
    pub fn combined_performance(&self) -> &[AggregatedRecord] {
        &self.combined
    }

    /// Chart input for the current view: the active prompt's history, or the
    /// combined series on the dashboard.
    pub fn chart_data(&self) -> (Vec<DisplayRecord>, [PieBucket; 2]) {
        match self.active_prompt() {
            Some(prompt) => (
                format_chart_data(&prompt.performance),
                process_pie_data(&prompt.performance),
            ),
            None => (
                format_chart_data(&self.combined),
                process_pie_data(&self.combined),
            ),
        }
    }

    /// Whether the chart must be redrawn, clearing the flag.
    pub fn take_update_needed(&mut self) -> bool {
        std::mem::take(&mut self.update_needed)
    }
}

/// Main application state
pub struct App {
    pub state: DashboardState,
    pub plot_style: ChartStyle,
    pub plot_texture: Option<TextureHandle>,
    pub last_chart: Option<Arc<RenderedChart>>,
    pub export_path: PathBuf,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    pub fn new(state: DashboardState, config: &Config) -> Self {
        Self {
            state,
            plot_style: ChartStyle::with_size(config.plot_width, config.plot_height),
            plot_texture: None,
            last_chart: None,
            export_path: PathBuf::from("performance_chart.png"),
            status_message: None,
            error_message: None,
        }
    }
}

impl EApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::draw_ui(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MockProvider;
    use pretty_assertions::assert_eq;

    fn state() -> DashboardState {
        DashboardState::new(Box::new(MockProvider::new()), &Config::default())
    }

    #[test]
    fn test_defaults() {
        let mut state = state();
        assert_eq!(state.chart_type(), ChartType::Area);
        assert!(state.active_prompt().is_none());
        assert_eq!(state.view_mode(), ViewMode::Grid);
        assert_eq!(state.selected_category(), None);
        // First frame always draws the chart
        assert!(state.take_update_needed());
        assert!(!state.take_update_needed());
    }

    #[test]
    fn test_any_chart_type_reachable_from_any_other() {
        let mut state = state();
        for from in ChartType::ALL {
            for to in ChartType::ALL {
                state.set_chart_type(from);
                state.set_chart_type(to);
                assert_eq!(state.chart_type(), to);
            }
        }
    }

    #[test]
    fn test_chart_type_change_requests_redraw() {
        let mut state = state();
        state.take_update_needed();

        state.set_chart_type(ChartType::Area);
        assert!(!state.take_update_needed());

        state.set_chart_type(ChartType::Pie);
        assert!(state.take_update_needed());
    }

    #[test]
    fn test_select_and_leave_prompt() {
        let mut state = state();
        state.take_update_needed();

        state.select_prompt(PromptId::from("code-review"));
        assert_eq!(state.active_prompt().unwrap().name, "Code Review Assistant");
        assert!(state.take_update_needed());

        let (series, _) = state.chart_data();
        assert_eq!(series.len(), state.active_prompt().unwrap().performance.len());

        state.back_to_dashboard();
        assert!(state.active_prompt().is_none());
        assert!(state.take_update_needed());

        let (series, _) = state.chart_data();
        assert_eq!(series.len(), state.combined_performance().len());
    }

    #[test]
    fn test_unknown_prompt_shows_dashboard() {
        let mut state = state();
        state.select_prompt(PromptId::from("missing"));
        assert!(state.active_prompt().is_none());
    }

    #[test]
    fn test_filters_apply_to_visible_prompts() {
        let mut state = state();
        let all = state.visible_prompts().len();

        state.select_category(Some("Marketing".to_string()));
        assert!(state.visible_prompts().iter().all(|p| p.category == "Marketing"));

        state.set_search_term("email");
        let names: Vec<&str> = state.visible_prompts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Email Campaign Writer"]);

        state.select_category(None);
        state.set_search_term("");
        assert_eq!(state.visible_prompts().len(), all);
    }

    #[test]
    fn test_toggle_category() {
        let mut state = state();
        assert!(state.is_expanded("Support"));
        state.toggle_category("Support");
        assert!(!state.is_expanded("Support"));
        state.toggle_category("Support");
        assert!(state.is_expanded("Support"));
    }
}
