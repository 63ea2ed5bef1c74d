//! Material definitions and registry for level geometry.

use bevy::prelude::*;
use std::collections::HashMap;

/// Material registry mapping material names to handles.
pub struct MaterialRegistry {
    platforms: HashMap<String, Handle<StandardMaterial>>,
    /// Used for platforms naming a material that does not exist.
    fallback: Handle<StandardMaterial>,
    pub wire: Handle<StandardMaterial>,
    pub broken_wire: Handle<StandardMaterial>,
    pub gap_marker: Handle<StandardMaterial>,
    pub bolt: Handle<StandardMaterial>,
}

impl MaterialRegistry {
    pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        let mut platforms = HashMap::new();

        // Stone material (default) - desaturated grey-brown
        let stone = materials.add(StandardMaterial {
            base_color: Color::srgb(0.28, 0.27, 0.26),
            perceptual_roughness: 0.9,
            ..default()
        });
        platforms.insert("stone".to_string(), stone.clone());

        // Wall material, lighter so rideable walls read against floors
        platforms.insert(
            "stone_wall".to_string(),
            materials.add(StandardMaterial {
                base_color: Color::srgb(0.42, 0.40, 0.38),
                perceptual_roughness: 0.8,
                ..default()
            }),
        );

        // Metal material - desaturated grey
        platforms.insert(
            "metal".to_string(),
            materials.add(StandardMaterial {
                base_color: Color::srgb(0.42, 0.42, 0.44),
                perceptual_roughness: 0.3,
                metallic: 0.8,
                ..default()
            }),
        );

        let wire = materials.add(StandardMaterial {
            base_color: Color::srgb(0.15, 0.15, 0.18),
            perceptual_roughness: 0.4,
            metallic: 0.6,
            ..default()
        });

        // Broken wires glow faintly at their frayed ends
        let broken_wire = materials.add(StandardMaterial {
            base_color: Color::srgb(0.25, 0.12, 0.10),
            emissive: LinearRgba::rgb(0.4, 0.1, 0.05),
            ..default()
        });

        let gap_marker = materials.add(StandardMaterial {
            base_color: Color::srgba(0.4, 0.8, 1.0, 0.25),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });

        // Brass bolts catch the light
        let bolt = materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.65, 0.25),
            perceptual_roughness: 0.25,
            metallic: 0.9,
            ..default()
        });

        Self {
            platforms,
            fallback: stone,
            wire,
            broken_wire,
            gap_marker,
            bolt,
        }
    }

    /// Get material for a platform by name.
    pub fn get_platform(&self, material_name: &str) -> Handle<StandardMaterial> {
        self.platforms
            .get(material_name)
            .cloned()
            .unwrap_or_else(|| {
                warn!("Unknown material '{}', using stone", material_name);
                self.fallback.clone()
            })
    }
}
