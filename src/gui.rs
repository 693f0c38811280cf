//! Native GUI viewer using egui
//!
//! Dual-colored coin scatter with mouse pan, scroll zoom and
//! click-to-inspect, plus the raw table below the plot

use eframe::egui;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::plot::color::Rgb;
use crate::plot::interact::{Button, InteractionController, PointerEvent};
use crate::plot::scene::{self, HalfDiscPrim, Scene};
use crate::plot::viewport::{CanvasSize, ScrollDirection, Viewport};
use crate::plot::ColumnSelection;
use crate::table::DataTable;

/// Segments used to tessellate one half-disc arc
const ARC_STEPS: usize = 24;

/// Run the native GUI viewer
pub fn run_viewer(config: Config, data_dir: String, csv: Option<PathBuf>) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_title("Coin Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Coin Viewer",
        options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc, config, data_dir, csv)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}

struct ViewerApp {
    config: Config,
    data_dir: String,
    table: Option<DataTable>,
    csv_path: Option<PathBuf>,
    selection: ColumnSelection,
    scene: Scene,
    viewport: Viewport,
    controller: InteractionController,
    // Primitives of the last painted frame, hit-tested on the next press
    prims: Vec<HalfDiscPrim>,
    inspected: Option<usize>,
    load_error: Option<String>,
}

impl ViewerApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: Config,
        data_dir: String,
        csv: Option<PathBuf>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let controller = InteractionController::new(config.zoom_step);
        let mut app = Self {
            config,
            data_dir,
            table: None,
            csv_path: None,
            selection: ColumnSelection::default(),
            scene: Scene::default(),
            viewport: Viewport::default(),
            controller,
            prims: Vec::new(),
            inspected: None,
            load_error: None,
        };

        if let Some(path) = csv {
            app.load_csv(path);
        }
        app
    }

    fn load_csv(&mut self, path: PathBuf) {
        info!("Loading CSV from {:?}", path);
        match DataTable::from_csv_path(&path) {
            Ok(table) => {
                self.selection = self.default_selection(&table);
                self.table = Some(table);
                self.csv_path = Some(path);
                self.load_error = None;
                self.inspected = None;
                self.rebuild_scene();
            }
            Err(e) => {
                warn!("Failed to load {:?}: {}", path, e);
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Startup column choices: configured defaults where the table has
    /// a matching column, otherwise unset.
    fn default_selection(&self, table: &DataTable) -> ColumnSelection {
        let pick = |name: &Option<String>| {
            name.as_ref()
                .filter(|n| table.column_index(n).is_some())
                .cloned()
        };
        let defaults = &self.config.default_columns;
        ColumnSelection {
            x: pick(&defaults.x),
            y: pick(&defaults.y),
            obverse: pick(&defaults.obverse),
            reverse: pick(&defaults.reverse),
        }
    }

    /// Full rebuild: color maps, glyphs, autoscaled viewport. Runs on
    /// CSV load and on any column selection change.
    fn rebuild_scene(&mut self) {
        let Some(table) = &self.table else {
            self.scene = Scene::default();
            self.prims.clear();
            return;
        };

        self.scene = Scene::build(
            table,
            &self.selection,
            &self.config.obverse_colors(),
            &self.config.reverse_colors(),
            self.config.glyph_radius,
        );
        self.viewport = Viewport::around_glyphs(&self.scene.glyphs);
        self.prims.clear();
    }

    /// Map a window position into plot data coordinates; None outside
    /// the plot area.
    fn resolve(&self, pos: egui::Pos2, rect: egui::Rect, canvas: CanvasSize) -> Option<(f64, f64)> {
        if !rect.contains(pos) {
            return None;
        }
        Some(
            self.viewport
                .screen_to_data(pos.x - rect.left(), pos.y - rect.top(), canvas),
        )
    }

    /// Translate this frame's raw input into pointer events, in the
    /// order the interaction machine expects: a pick lands just before
    /// the press of its gesture.
    fn gather_events(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        canvas: CanvasSize,
    ) -> Vec<PointerEvent> {
        ui.input(|i| {
            let pos = i.pointer.latest_pos();
            let data_pos = pos.and_then(|p| self.resolve(p, rect, canvas));

            let mut events = Vec::new();

            if i.pointer.button_pressed(egui::PointerButton::Primary) {
                if let Some(p) = pos {
                    if data_pos.is_some() {
                        if let Some(hit) =
                            scene::hit_test(&self.prims, p.x - rect.left(), p.y - rect.top())
                        {
                            events.push(PointerEvent::Pick { row: hit.row });
                        }
                    }
                }
                events.push(PointerEvent::Press {
                    button: Button::Primary,
                    pos: data_pos,
                });
            }
            if i.pointer.button_pressed(egui::PointerButton::Secondary) {
                events.push(PointerEvent::Press {
                    button: Button::Secondary,
                    pos: data_pos,
                });
            }
            if i.pointer.button_pressed(egui::PointerButton::Middle) {
                events.push(PointerEvent::Press {
                    button: Button::Other,
                    pos: data_pos,
                });
            }

            if i.pointer.delta() != egui::Vec2::ZERO {
                events.push(PointerEvent::Motion { pos: data_pos });
            }

            if i.pointer.any_released() {
                events.push(PointerEvent::Release);
            }

            let scroll = i.raw_scroll_delta;
            let direction = if scroll.y > 0.0 {
                Some(ScrollDirection::Up)
            } else if scroll.y < 0.0 {
                Some(ScrollDirection::Down)
            } else if scroll.x != 0.0 {
                Some(ScrollDirection::Other)
            } else {
                None
            };
            if let Some(direction) = direction {
                events.push(PointerEvent::Scroll {
                    direction,
                    pos: data_pos,
                });
            }

            events
        })
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel - CSV loading and column selection
        egui::TopBottomPanel::top("controls_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Load CSV").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV files", &["csv"])
                        .set_directory(&self.data_dir)
                        .pick_file()
                    {
                        self.load_csv(path);
                    }
                }
                if let Some(path) = &self.csv_path {
                    ui.label(path.display().to_string());
                }
                if let Some(err) = &self.load_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });

            let mut changed = false;
            if let Some(table) = &self.table {
                let columns = table.columns().to_vec();
                ui.horizontal(|ui| {
                    changed |= column_combo(ui, "x_column", "X:", &columns, &mut self.selection.x);
                    changed |= column_combo(ui, "y_column", "Y:", &columns, &mut self.selection.y);
                    changed |= column_combo(
                        ui,
                        "obv_column",
                        "Obverse:",
                        &columns,
                        &mut self.selection.obverse,
                    );
                    changed |= column_combo(
                        ui,
                        "rev_column",
                        "Reverse:",
                        &columns,
                        &mut self.selection.reverse,
                    );

                    // Re-autoscale without changing the selection
                    if ui.button("Replot").clicked() {
                        changed = true;
                    }
                });
            }
            if changed {
                self.rebuild_scene();
            }
        });

        // Bottom panel - the raw table
        egui::TopBottomPanel::bottom("table_panel")
            .resizable(true)
            .default_height(200.0)
            .show(ctx, |ui| match &self.table {
                Some(table) if !table.columns().is_empty() => show_table(ui, table),
                _ => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Load a CSV to see its rows here");
                    });
                }
            });

        // Central panel - the plot
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(format!(
                "{} coins | Drag: pan | Scroll: zoom | Click a coin: inspect",
                self.scene.glyphs.len()
            ));

            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let canvas = CanvasSize {
                width: rect.width(),
                height: rect.height(),
            };

            for event in self.gather_events(ui, rect, canvas) {
                let outcome = self.controller.handle_event(event, &mut self.viewport);
                if let Some(row) = outcome.inspect {
                    self.inspected = Some(row);
                }
                if outcome.repaint {
                    ctx.request_repaint();
                }
            }

            let painter = painter.with_clip_rect(rect);
            painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

            self.prims = scene::render(&self.scene.glyphs, &self.viewport, canvas);
            for prim in &self.prims {
                painter.add(half_disc_shape(prim, rect.min));
            }
        });

        // Inspection window for the picked coin
        if let Some(row_idx) = self.inspected {
            let mut open = true;
            if let Some(table) = &self.table {
                egui::Window::new("Coin Info")
                    .open(&mut open)
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        egui::Grid::new("coin_info")
                            .num_columns(2)
                            .striped(true)
                            .show(ui, |ui| {
                                for (col, name) in table.columns().iter().enumerate() {
                                    ui.strong(name);
                                    ui.label(table.cell(row_idx, col).unwrap_or(""));
                                    ui.end_row();
                                }
                            });
                    });
            }
            if !open {
                self.inspected = None;
            }
        }
    }
}

/// One column selector; returns true when the choice changed
fn column_combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    columns: &[String],
    slot: &mut Option<String>,
) -> bool {
    let mut changed = false;
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(slot.as_deref().unwrap_or("-").to_string())
        .show_ui(ui, |ui| {
            for name in columns {
                if ui
                    .selectable_value(slot, Some(name.clone()), name)
                    .changed()
                {
                    changed = true;
                }
            }
        });
    changed
}

fn show_table(ui: &mut egui::Ui, table: &DataTable) {
    use egui_extras::{Column, TableBuilder};

    let n_cols = table.columns().len();
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true).at_least(60.0), n_cols)
        .header(20.0, |mut header| {
            for name in table.columns() {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.row_count(), |mut row| {
                let idx = row.index();
                for col in 0..n_cols {
                    row.col(|ui| {
                        ui.label(table.cell(idx, col).unwrap_or(""));
                    });
                }
            });
        });
}

/// Tessellate one half-disc into a filled, outlined polygon. The arc
/// runs through the side's angle span; the straight diameter edge
/// closes the polygon.
fn half_disc_shape(prim: &HalfDiscPrim, origin: egui::Pos2) -> egui::Shape {
    let (start, end) = prim.side.angle_span();
    let cx = origin.x + prim.center.0;
    let cy = origin.y + prim.center.1;

    let mut points = Vec::with_capacity(ARC_STEPS + 1);
    for step in 0..=ARC_STEPS {
        let angle = (start + (end - start) * step as f32 / ARC_STEPS as f32).to_radians();
        // Canvas y grows downward, data angles counterclockwise
        points.push(egui::pos2(
            cx + prim.rx * angle.cos(),
            cy - prim.ry * angle.sin(),
        ));
    }

    egui::Shape::convex_polygon(
        points,
        color32(prim.fill),
        egui::Stroke::new(1.0, egui::Color32::BLACK),
    )
}

fn color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}
