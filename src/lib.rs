//! # Bevy UV Tools
//!
//! UV shell copy/paste, whole-mesh UV transfer and nearest-point UV snapping
//! for meshes in a Bevy scene. The correspondence logic lives in the
//! `uv_transfer` crate; this crate hosts it in a small editor.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_uv_tools::UvToolsPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(UvToolsPlugin)
//!         .run();
//! }
//! ```
//!
//! ## Making Meshes Editable
//!
//! Mark mesh entities with `SceneEntity` so they can be picked and edited:
//!
//! ```ignore
//! commands.spawn((
//!     Name::new("Crate"),
//!     SceneEntity,
//!     Mesh3d(meshes.add(Cuboid::default())),
//!     MeshMaterial3d(material),
//! ));
//! ```
//!
//! ## Workflow
//!
//! - Click meshes in the viewport or the object list (shift adds).
//! - Pick UV points in the UV Editor, then **Copy Shell** (`Ctrl+Shift+C`).
//! - Pick a point on other shells and **Paste Shell** (`Ctrl+Shift+V`).
//! - **Copy UVs** / **Paste UVs** transfer the first selected mesh's layout
//!   onto every other selected mesh with the same topology.
//! - **Set Target** marks shells to snap onto, **Snap** pulls the picked
//!   points onto their nearest target point within the threshold.
//! - `Ctrl+Z` / `Ctrl+Shift+Z` undo and redo.

pub mod commands;
pub mod editor;
pub mod modeling;
pub mod scene;
pub mod selection;
pub mod tools;
pub mod ui;
mod utils;

pub use editor::UvToolsPlugin;

pub use modeling::{EditMesh, SceneUvHost};
pub use scene::{spawn_demo_scene, SceneEntity};
pub use selection::{Selected, SelectionOrder, UvSelection};
pub use tools::{UvClipboard, UvToolStatus};
pub use ui::Settings;
