use bevy::prelude::*;
use bevy_egui::{egui, EguiContext, EguiContextSettings, EguiContexts, EguiPrimaryContextPass};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uv_transfer::{TopologyCheck, TransferMode, DEFAULT_SNAP_THRESHOLD};

use crate::editor::EditorState;

/// Smallest threshold the snap slider offers
pub const MIN_SNAP_THRESHOLD: f32 = 0.001;
/// Largest threshold the snap slider offers
pub const MAX_SNAP_THRESHOLD: f32 = 0.1;

/// Application settings that persist to disk
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// UI scale factor (1.0 = default)
    pub ui_scale: f32,
    /// Camera mouse sensitivity
    pub camera_sensitivity: f32,
    /// Largest UV distance a point may move when snapping
    pub snap_threshold: f32,
    /// Mode used by Paste Shell, from the panel and the hotkey
    pub paste_mode: TransferMode,
    /// Topology check applied before pasting
    pub topology_check: TopologyCheck,
    pub show_uv_editor: bool,
    pub show_uv_tools: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui_scale: 1.5,
            camera_sensitivity: 0.003,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            paste_mode: TransferMode::CentroidRelative,
            topology_check: TopologyCheck::Strict,
            show_uv_editor: true,
            show_uv_tools: true,
        }
    }
}

impl Settings {
    /// Get the settings file path
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("bevy_uv_tools");
            p.push("settings.ron");
            p
        })
    }

    /// Parse settings, clamping values a hand-edited file may have broken.
    pub fn from_ron(content: &str) -> Result<Self, ron::error::SpannedError> {
        let mut settings: Self = ron::from_str(content)?;
        settings.snap_threshold = if settings.snap_threshold.is_finite() {
            settings
                .snap_threshold
                .clamp(MIN_SNAP_THRESHOLD, MAX_SNAP_THRESHOLD)
        } else {
            DEFAULT_SNAP_THRESHOLD
        };
        Ok(settings)
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::from_ron(&content).unwrap_or_else(|e| {
                warn!("Ignoring unreadable settings at {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            error!("Could not determine config directory");
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    error!("Failed to save settings: {}", e);
                } else {
                    debug!("Settings saved to: {:?}", path);
                }
            }
            Err(e) => {
                error!("Failed to serialize settings: {}", e);
            }
        }
    }
}

/// Resource to track if settings window is open
#[derive(Resource, Default)]
pub struct SettingsWindowState {
    pub open: bool,
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Settings::load())
            .init_resource::<SettingsWindowState>()
            .add_systems(Update, (apply_ui_scale, save_changed_settings))
            .add_systems(EguiPrimaryContextPass, draw_settings_window);
    }
}

/// Apply UI scale to egui
fn apply_ui_scale(
    settings: Res<Settings>,
    mut query: Query<&mut EguiContextSettings, With<EguiContext>>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut ctx_settings in &mut query {
        ctx_settings.scale_factor = settings.ui_scale;
    }
}

/// Persist whenever a panel edits the settings; the first frame is the load itself.
fn save_changed_settings(settings: Res<Settings>) {
    if settings.is_changed() && !settings.is_added() {
        settings.save();
    }
}

fn draw_settings_window(
    mut contexts: EguiContexts,
    mut settings: ResMut<Settings>,
    mut window_state: ResMut<SettingsWindowState>,
    editor_state: Res<EditorState>,
) -> Result {
    if !editor_state.ui_enabled || !window_state.open {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    // Edit a copy so merely drawing the window does not mark the resource changed
    let mut edited = settings.clone();
    egui::Window::new("Settings")
        .open(&mut window_state.open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Interface");
            egui::Grid::new("settings_ui_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("UI Scale:");
                    ui.add(
                        egui::Slider::new(&mut edited.ui_scale, 0.75..=3.0)
                            .step_by(0.25)
                            .suffix("x"),
                    );
                    ui.end_row();

                    ui.label("Orbit Sensitivity:");
                    ui.add(
                        egui::Slider::new(&mut edited.camera_sensitivity, 0.001..=0.01)
                            .fixed_decimals(3),
                    );
                    ui.end_row();

                    ui.label("UV Editor:");
                    ui.checkbox(&mut edited.show_uv_editor, "");
                    ui.end_row();

                    ui.label("UV Tools:");
                    ui.checkbox(&mut edited.show_uv_tools, "");
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.heading("Transfer");
            egui::Grid::new("settings_transfer_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Shell Paste Mode:");
                    transfer_mode_combo(ui, "settings_paste_mode", &mut edited.paste_mode);
                    ui.end_row();

                    ui.label("Topology Check:");
                    topology_check_combo(ui, "settings_topology", &mut edited.topology_check);
                    ui.end_row();
                });
        });

    if edited != *settings {
        *settings = edited;
    }
    Ok(())
}

/// Combo box choosing how pasted coordinates are placed.
pub fn transfer_mode_combo(ui: &mut egui::Ui, id: &str, mode: &mut TransferMode) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(mode.display_name())
        .show_ui(ui, |ui| {
            for option in [TransferMode::CentroidRelative, TransferMode::Absolute] {
                ui.selectable_value(mode, option, option.display_name());
            }
        });
}

pub fn topology_check_combo(ui: &mut egui::Ui, id: &str, check: &mut TopologyCheck) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(check.display_name())
        .show_ui(ui, |ui| {
            for option in [TopologyCheck::Strict, TopologyCheck::Lenient] {
                ui.selectable_value(check, option, option.display_name());
            }
        });
}
