use egui::{Color32, ComboBox, Context, Pos2, RichText, Sense, Stroke, Ui};
use log::{info, warn};

use super::state::{App, ViewMode};
use crate::analysis::format::{long_date_label, success_percent};
use crate::analysis::stats::{
    format_thousands, prompt_success_rate, sparkline_points, SuccessRating,
};
use crate::plotting::render_chart;
use crate::types::{ChartType, Prompt, PromptIcon, PromptId, SeriesPoint};

const EMERALD: Color32 = Color32::from_rgb(16, 185, 129);
const AMBER: Color32 = Color32::from_rgb(245, 158, 11);
const ROSE: Color32 = Color32::from_rgb(244, 63, 94);
const PRIMARY: Color32 = Color32::from_rgb(59, 130, 246);

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context) {
    // Update plot if needed
    if app.state.take_update_needed() || app.plot_texture.is_none() {
        refresh_chart(app, ctx);
    }

    let mut selected: Option<PromptId> = None;

    egui::SidePanel::left("side_panel").show(ctx, |ui| {
        ui.heading("Prompts");
        ui.separator();

        if ui
            .selectable_label(app.state.active_prompt().is_none(), "Dashboard")
            .clicked()
        {
            app.state.back_to_dashboard();
        }
        ui.separator();

        let mut toggled: Option<String> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            let active_id = app.state.active_prompt().map(|p| p.id.clone());
            for (category, members) in crate::analysis::group_by_category(app.state.prompts()) {
                let response = egui::CollapsingHeader::new(&category)
                    .open(Some(app.state.is_expanded(&category)))
                    .show(ui, |ui| {
                        for prompt in members {
                            let label = format!("{} {}", icon_glyph(prompt.icon), prompt.name);
                            let is_active = active_id.as_ref() == Some(&prompt.id);
                            if ui.selectable_label(is_active, label).clicked() {
                                selected = Some(prompt.id.clone());
                            }
                        }
                    });
                if response.header_response.clicked() {
                    toggled = Some(category);
                }
            }
        });
        if let Some(category) = toggled {
            app.state.toggle_category(&category);
        }

        ui.separator();
        let user = app.state.user();
        ui.label(format!("{} ({})", user.name, user.initials()));
        if !user.plan.is_empty() {
            ui.small(format!("{} plan", user.plan));
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            let detail = app.state.active_prompt().cloned();
            match detail {
                Some(prompt) => draw_detail(app, ui, &prompt),
                None => draw_dashboard(app, ui, &mut selected),
            }
        });
    });

    if let Some(id) = selected {
        app.state.select_prompt(id);
    }
}

fn refresh_chart(app: &mut App, ctx: &Context) {
    let (series, pie) = app.state.chart_data();
    match render_chart(&series, &pie, app.state.chart_type(), &app.plot_style) {
        Ok(chart) => {
            let image = egui::ColorImage::from_rgb(
                [chart.width as usize, chart.height as usize],
                &chart.rgb,
            );
            app.plot_texture =
                Some(ctx.load_texture("performance_chart", image, egui::TextureOptions::LINEAR));
            app.last_chart = Some(chart);
            app.error_message = None;
        }
        Err(e) => {
            warn!("Plotting error: {}", e);
            app.error_message = Some(e.to_string());
        }
    }
}

fn draw_dashboard(app: &mut App, ui: &mut Ui, selected: &mut Option<PromptId>) {
    ui.heading("Prompt Dashboard");
    ui.separator();

    let stats = app.state.overview();
    ui.horizontal(|ui| {
        stat_card(ui, "Total Prompts", &stats.total_prompts.to_string());
        stat_card(ui, "Total Usage", &format_thousands(stats.total_usage));
        stat_card(
            ui,
            "Success Rate",
            &format!("{}%", success_percent(stats.success_rate)),
        );
    });

    ui.add_space(8.0);
    draw_chart_panel(
        app,
        ui,
        "Overall Performance",
        "Usage and success rate across all prompts",
    );

    ui.add_space(8.0);
    ui.separator();
    ui.heading("Your Prompts");
    ui.label("Manage and monitor your prompt templates and their performance.");

    ui.horizontal(|ui| {
        let mut term = app.state.search_term().to_string();
        ui.label("Search:");
        if ui.text_edit_singleline(&mut term).changed() {
            app.state.set_search_term(term);
        }

        let mut mode = app.state.view_mode();
        ui.selectable_value(&mut mode, ViewMode::Grid, "Grid");
        ui.selectable_value(&mut mode, ViewMode::List, "List");
        app.state.set_view_mode(mode);

        // Prompt editing is not available yet
        ui.add_enabled(false, egui::Button::new("New Prompt"));
    });

    ui.horizontal(|ui| {
        let current = app.state.selected_category().map(str::to_string);
        let mut choice = current.clone();
        ui.selectable_value(&mut choice, None, "All Prompts");
        for category in app.state.categories() {
            ui.selectable_value(&mut choice, Some(category.clone()), category);
        }
        if choice != current {
            app.state.select_category(choice);
        }
    });
    ui.add_space(4.0);

    let visible = app.state.visible_prompts();
    if visible.is_empty() {
        ui.label("No prompts match your search.");
        return;
    }

    match app.state.view_mode() {
        ViewMode::Grid => {
            egui::Grid::new("prompt_grid")
                .num_columns(3)
                .spacing([12.0, 12.0])
                .show(ui, |ui| {
                    for (i, prompt) in visible.iter().enumerate() {
                        if prompt_card(ui, prompt) {
                            *selected = Some(prompt.id.clone());
                        }
                        if i % 3 == 2 {
                            ui.end_row();
                        }
                    }
                });
        }
        ViewMode::List => {
            for prompt in &visible {
                if prompt_row(ui, prompt) {
                    *selected = Some(prompt.id.clone());
                }
            }
        }
    }
}

fn draw_detail(app: &mut App, ui: &mut Ui, prompt: &Prompt) {
    ui.horizontal(|ui| {
        if ui.button("< Back").clicked() {
            app.state.back_to_dashboard();
        }
        ui.heading(format!("{} {}", icon_glyph(prompt.icon), prompt.name));
        ui.label(RichText::new(&prompt.category).weak());
    });
    ui.label(&prompt.description);
    ui.separator();

    ui.label(RichText::new("Prompt Template").strong());
    ui.group(|ui| {
        ui.label(RichText::new(&prompt.content).monospace());
    });

    ui.add_space(8.0);
    draw_chart_panel(app, ui, "Prompt Usage & Success Rate", "Daily performance");

    ui.add_space(8.0);
    ui.separator();
    egui::Grid::new("prompt_details").num_columns(2).show(ui, |ui| {
        ui.label("Usage");
        ui.label(format_thousands(prompt.usage));
        ui.end_row();

        ui.label("Success rate");
        rating_label(ui, prompt);
        ui.end_row();

        ui.label("Created");
        ui.label(long_date_label(prompt.created_at));
        ui.end_row();

        ui.label("Last updated");
        ui.label(long_date_label(prompt.updated_at));
        ui.end_row();

        ui.label("Owner");
        ui.label(&app.state.user().name);
        ui.end_row();
    });

    ui.add_space(8.0);
    ui.label("Success rate trend");
    let values: Vec<f64> = prompt
        .performance
        .iter()
        .map(|r| r.success_rate() * 100.0)
        .collect();
    sparkline(ui, &values);
}

fn draw_chart_panel(app: &mut App, ui: &mut Ui, title: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(title).strong());
            ui.label(RichText::new(description).weak());
        });

        let mut chart_type = app.state.chart_type();
        ComboBox::new("chart_type_selector", "")
            .selected_text(chart_type.label())
            .show_ui(ui, |ui| {
                for option in ChartType::ALL {
                    ui.selectable_value(&mut chart_type, option, option.label());
                }
            });
        app.state.set_chart_type(chart_type);

        if app.last_chart.is_some() && ui.button("Export").clicked() {
            export_chart(app);
        }
    });

    if let Some(texture) = &app.plot_texture {
        ui.image(texture);
    }
    if let Some(error) = &app.error_message {
        ui.colored_label(ROSE, error);
    }
    if let Some(status) = &app.status_message {
        ui.small(status);
    }
}

fn export_chart(app: &mut App) {
    let Some(chart) = &app.last_chart else {
        return;
    };
    match chart.save(&app.export_path) {
        Ok(()) => {
            info!("Chart exported to {}", app.export_path.display());
            app.status_message = Some(format!("Saved {}", app.export_path.display()));
        }
        Err(e) => {
            warn!("Chart export failed: {}", e);
            app.error_message = Some(e.to_string());
        }
    }
}

fn stat_card(ui: &mut Ui, title: &str, value: &str) {
    ui.group(|ui| {
        ui.set_min_width(160.0);
        ui.vertical(|ui| {
            ui.label(RichText::new(title).weak());
            ui.label(RichText::new(value).size(22.0).strong());
        });
    });
}

/// Returns true when the card was clicked.
fn prompt_card(ui: &mut Ui, prompt: &Prompt) -> bool {
    ui.group(|ui| {
        ui.set_width(240.0);
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(icon_glyph(prompt.icon)).size(18.0));
                ui.label(RichText::new(&prompt.name).strong());
            });
            ui.label(RichText::new(&prompt.category).weak());
            ui.label(&prompt.description);
            ui.separator();
            ui.horizontal(|ui| {
                ui.label(format!("Usage {}", format_thousands(prompt.usage)));
                rating_label(ui, prompt);
            });
            ui.small(format!("Updated {}", long_date_label(prompt.updated_at)));
            ui.button("Details").clicked()
        })
        .inner
    })
    .inner
}

/// Returns true when the row was clicked.
fn prompt_row(ui: &mut Ui, prompt: &Prompt) -> bool {
    ui.horizontal(|ui| {
        ui.label(icon_glyph(prompt.icon));
        let clicked = ui.link(&prompt.name).clicked();
        ui.label(RichText::new(&prompt.category).weak());
        ui.label(format_thousands(prompt.usage));
        rating_label(ui, prompt);
        clicked
    })
    .inner
}

fn rating_label(ui: &mut Ui, prompt: &Prompt) {
    match prompt_success_rate(prompt) {
        Some(percent) => {
            let rating = SuccessRating::from_percent(percent);
            let color = match rating {
                SuccessRating::Excellent => EMERALD,
                SuccessRating::Good => AMBER,
                SuccessRating::NeedsImprovement => ROSE,
            };
            ui.label(format!("{:.1}%", percent));
            ui.colored_label(color, rating.label());
        }
        None => {
            ui.label("No usage yet");
        }
    }
}

fn sparkline(ui: &mut Ui, values: &[f64]) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 40.0), Sense::hover());
    let points: Vec<Pos2> = sparkline_points(values)
        .into_iter()
        .map(|(x, y)| {
            Pos2::new(
                rect.left() + (x / 100.0) as f32 * rect.width(),
                rect.top() + (y / 10.0) as f32 * rect.height(),
            )
        })
        .collect();
    if points.len() > 1 {
        ui.painter()
            .add(egui::Shape::line(points, Stroke::new(1.5, PRIMARY)));
    }
}

fn icon_glyph(icon: PromptIcon) -> &'static str {
    match icon {
        PromptIcon::Sparkles => "✨",
        PromptIcon::FileText => "📄",
        PromptIcon::MessageSquare => "💬",
        PromptIcon::Bot => "🤖",
        PromptIcon::Brain => "🧠",
        PromptIcon::Code => "💻",
        PromptIcon::Mail => "✉",
        PromptIcon::Image => "🖼",
    }
}
