//! Demo scene for the standalone binary: a few textured meshes with matching
//! and mismatching topology to try the UV tools on.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use super::SceneEntity;

/// Checker texture resolution in texels per side.
const CHECKER_SIZE: u32 = 256;
/// Checker cells per side.
const CHECKER_CELLS: u32 = 8;

/// Build an RGBA checker image so UV layout changes are visible on screen.
pub fn checker_image() -> Image {
    let mut data = Vec::with_capacity((CHECKER_SIZE * CHECKER_SIZE * 4) as usize);
    let cell = CHECKER_SIZE / CHECKER_CELLS;
    for y in 0..CHECKER_SIZE {
        for x in 0..CHECKER_SIZE {
            let (cx, cy) = (x / cell, y / cell);
            let texel = if (cx + cy) % 2 == 0 {
                [220, 220, 225, 255]
            } else {
                // Tint by cell so orientation is readable
                [
                    (40 + cx * 20) as u8,
                    (60 + cy * 18) as u8,
                    140,
                    255,
                ]
            };
            data.extend_from_slice(&texel);
        }
    }

    Image::new(
        Extent3d {
            width: CHECKER_SIZE,
            height: CHECKER_SIZE,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
}

/// Spawn the demo objects.
pub fn spawn_demo_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let checker = materials.add(StandardMaterial {
        base_color_texture: Some(images.add(checker_image())),
        perceptual_roughness: 0.8,
        ..default()
    });
    let flat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.6, 0.6, 0.65),
        ..default()
    });

    let objects: [(&str, Mesh, Vec3); 5] = [
        ("Crate A", Cuboid::default().mesh().build(), Vec3::new(-3.0, 0.5, 0.0)),
        ("Crate B", Cuboid::default().mesh().build(), Vec3::new(-1.0, 0.5, 0.0)),
        (
            "Tall Crate",
            Cuboid::new(1.0, 2.0, 1.0).mesh().build(),
            Vec3::new(1.0, 1.0, 0.0),
        ),
        (
            "Ball",
            Sphere::new(0.6).mesh().uv(24, 12),
            Vec3::new(3.0, 0.6, 0.0),
        ),
        (
            "Floor Tile",
            Plane3d::default().mesh().size(2.0, 2.0).subdivisions(2).build(),
            Vec3::new(0.0, 0.0, 2.5),
        ),
    ];

    for (name, mesh, position) in objects {
        commands.spawn((
            Name::new(name),
            SceneEntity,
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(checker.clone()),
            Transform::from_translation(position),
        ));
    }

    // A mesh with no UV channel, to exercise the "not a UV-bearing object" path
    let mut bare = Cuboid::new(0.8, 0.8, 0.8).mesh().build();
    bare.remove_attribute(Mesh::ATTRIBUTE_UV_0);
    commands.spawn((
        Name::new("Untextured Block"),
        SceneEntity,
        Mesh3d(meshes.add(bare)),
        MeshMaterial3d(flat),
        Transform::from_xyz(0.0, 0.4, -2.5),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
