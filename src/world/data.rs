//! Level and tuning data structures and RON loading.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::core::GameState;
use crate::player::MovementConfig;
use crate::wires::{sort_wires, CurrentConfig, Wire, WireChain, WireId, WireKind};

/// Directory scanned for `*.level.ron` files.
pub const LEVELS_PATH: &str = "assets/data/levels";

/// Read a RON file into `T`.
///
/// A missing file is not an error: it logs a warning and yields the
/// defaults. A file that exists but cannot be read or parsed is.
pub fn load_ron_or_default<T: DeserializeOwned + Default>(path: &str) -> Result<T, DataLoadError> {
    if !Path::new(path).exists() {
        warn!("{} not found, using defaults", path);
        return Ok(T::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.to_string(),
        details: e.to_string(),
    })?;

    let value = ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })?;

    info!("Loaded {}", path);
    Ok(value)
}

fn to_vec3(value: (f32, f32, f32)) -> Vec3 {
    Vec3::new(value.0, value.1, value.2)
}

// === Global Ambient ===

/// Global ambient light settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalAmbientDef {
    pub color: (f32, f32, f32),
    pub brightness: f32,
}

impl Default for GlobalAmbientDef {
    fn default() -> Self {
        Self {
            color: (0.8, 0.85, 1.0),
            brightness: 400.0,
        }
    }
}

// === Camera ===

/// Fixed camera placement. The camera also orients the move input.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraDef {
    pub position: (f32, f32, f32),
    pub look_at: (f32, f32, f32),
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            position: (0.0, 8.0, 10.0),
            look_at: (0.0, 0.0, 0.0),
        }
    }
}

// === Platforms ===

fn default_platform_material() -> String {
    "stone".to_string()
}

/// An axis-aligned box the player can stand on or ride along.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDef {
    pub center: (f32, f32, f32),
    pub half_extents: (f32, f32, f32),
    #[serde(default = "default_platform_material")]
    pub material: String,
}

// === Wires ===

/// How a wire connects to its neighbours, as written in level files.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub enum WireKindDef {
    #[default]
    Continuous,
    /// Gap anchor of a gap at the wire's end.
    BrokenAtEnd((f32, f32, f32)),
    /// Gap anchor of a gap at the wire's start.
    BrokenAtStart((f32, f32, f32)),
}

impl From<WireKindDef> for WireKind {
    fn from(def: WireKindDef) -> Self {
        match def {
            WireKindDef::Continuous => WireKind::Continuous,
            WireKindDef::BrokenAtEnd(anchor) => WireKind::BrokenAtEnd {
                gap_anchor: to_vec3(anchor),
            },
            WireKindDef::BrokenAtStart(anchor) => WireKind::BrokenAtStart {
                gap_anchor: to_vec3(anchor),
            },
        }
    }
}

/// A wire as written in level files.
#[derive(Debug, Clone, Deserialize)]
pub struct WireDef {
    pub id: u32,
    pub start: (f32, f32, f32),
    pub end: (f32, f32, f32),
    #[serde(default)]
    pub kind: WireKindDef,
}

// === Level Definition ===

fn default_kill_plane_height() -> f32 {
    -10.0
}

/// Raw level definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinitionRaw {
    pub name: String,
    pub player_start: (f32, f32, f32),
    #[serde(default)]
    pub camera: CameraDef,
    /// Falling below this height loses the level.
    #[serde(default = "default_kill_plane_height")]
    pub kill_plane_height: f32,
    #[serde(default)]
    pub global_ambient: GlobalAmbientDef,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    pub wires: Vec<WireDef>,
    /// Resting positions of the level's bolt pickups.
    #[serde(default)]
    pub bolts: Vec<(f32, f32, f32)>,
}

/// A platform with resolved positions.
#[derive(Debug, Clone)]
pub struct Platform {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub material: String,
}

/// Processed level definition. Its wires are known to form a chain.
#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub name: String,
    pub player_start: Vec3,
    pub camera_position: Vec3,
    pub camera_look_at: Vec3,
    pub kill_plane_height: f32,
    pub global_ambient: GlobalAmbientDef,
    pub platforms: Vec<Platform>,
    /// Wires in file order, as they are spawned.
    pub wires: Vec<(WireId, Wire)>,
    /// The same wires in the order the current visits them.
    pub chain: WireChain,
    pub bolts: Vec<Vec3>,
}

impl LevelDefinition {
    /// Resolve a raw definition, rejecting malformed geometry up front.
    pub fn from_raw(raw: LevelDefinitionRaw) -> Result<Self, DataLoadError> {
        let mut platforms = Vec::with_capacity(raw.platforms.len());
        for (index, def) in raw.platforms.into_iter().enumerate() {
            let half_extents = to_vec3(def.half_extents);
            if !half_extents.is_finite() || half_extents.min_element() <= 0.0 {
                return Err(DataLoadError::InvalidPlatform {
                    level: raw.name,
                    index,
                    half_extents: def.half_extents,
                });
            }
            platforms.push(Platform {
                center: to_vec3(def.center),
                half_extents,
                material: def.material,
            });
        }

        let wires: Vec<(WireId, Wire)> = raw
            .wires
            .iter()
            .map(|def| {
                (
                    WireId(def.id),
                    Wire {
                        start: to_vec3(def.start),
                        end: to_vec3(def.end),
                        kind: def.kind.into(),
                    },
                )
            })
            .collect();

        let chain = sort_wires(wires.clone()).map_err(|source| DataLoadError::MalformedWires {
            level: raw.name.clone(),
            source,
        })?;

        Ok(Self {
            name: raw.name,
            player_start: to_vec3(raw.player_start),
            camera_position: to_vec3(raw.camera.position),
            camera_look_at: to_vec3(raw.camera.look_at),
            kill_plane_height: raw.kill_plane_height,
            global_ambient: raw.global_ambient,
            platforms,
            wires,
            chain,
            bolts: raw.bolts.into_iter().map(to_vec3).collect(),
        })
    }
}

/// Resource storing all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }
}

/// Resource indicating which level to load.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "first_light".to_string(),
        }
    }
}

/// Load the movement and current tuning files.
pub fn load_tuning(mut commands: Commands, mut exit: EventWriter<AppExit>) {
    match MovementConfig::load() {
        Ok(config) => commands.insert_resource(config),
        Err(e) => {
            error!("{}", e);
            exit.send(AppExit::error());
        }
    }

    match CurrentConfig::load() {
        Ok(config) => commands.insert_resource(config),
        Err(e) => {
            error!("{}", e);
            exit.send(AppExit::error());
        }
    }
}

fn load_level_file(path: &Path) -> Result<LevelDefinition, DataLoadError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    let raw = ron::from_str::<LevelDefinitionRaw>(&contents).map_err(|e| {
        DataLoadError::ParseError {
            path: display,
            details: e.to_string(),
        }
    })?;
    LevelDefinition::from_raw(raw)
}

/// Load all level definitions from assets/data/levels/.
///
/// A level that fails to load is fatal: better to stop than to let the
/// player into a level whose current cannot run.
pub fn load_level_definitions(mut commands: Commands, mut exit: EventWriter<AppExit>) {
    let mut registry = LevelRegistry::default();
    let levels_path = Path::new(LEVELS_PATH);

    if let Ok(entries) = fs::read_dir(levels_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }
            let Some(stem) = path.file_stem() else {
                continue;
            };
            let name = stem.to_string_lossy();
            let level_name = name.strip_suffix(".level").unwrap_or(&name).to_string();

            match load_level_file(&path) {
                Ok(level) => {
                    info!(
                        "Loaded level: {} ({} platforms, {} wires)",
                        level_name,
                        level.platforms.len(),
                        level.chain.len()
                    );
                    registry.levels.insert(level_name, level);
                }
                Err(e) => {
                    error!("Failed to load level {:?}: {}", path, e);
                    exit.send(AppExit::error());
                }
            }
        }
    } else {
        warn!("Levels directory not found: {:?}", levels_path);
    }

    info!("Loaded {} level(s)", registry.levels.len());
    commands.insert_resource(registry);
    commands.init_resource::<CurrentLevel>();
}

/// Enter the game once everything it needs has loaded.
pub fn finish_loading(
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    movement_config: Option<Res<MovementConfig>>,
    current_config: Option<Res<CurrentConfig>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    if movement_config.is_none() || current_config.is_none() {
        // Already reported by `load_tuning`.
        return;
    }

    if level_registry.get(&current_level.name).is_none() {
        error!("{}", DataLoadError::UnknownLevel(current_level.name.clone()));
        exit.send(AppExit::error());
        return;
    }

    next_state.set(GameState::InGame);
}
