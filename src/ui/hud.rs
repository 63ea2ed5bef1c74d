//! In-game HUD - wall-ride meter, bolt counter, and the level result banner.

use bevy::prelude::*;

use crate::core::{GameState, LevelEndEvent};
use crate::player::{Player, PlayerMotor};
use crate::world::BoltTally;

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the wall-ride meter fill.
#[derive(Component)]
pub struct WallRideBar;

/// Marker for the bolt counter text.
#[derive(Component)]
pub struct BoltCounter;

/// Marker for the banner shown when the level ends.
#[derive(Component)]
pub struct LevelBanner;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_wall_ride_bar, update_bolt_counter, show_level_banner)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands, tally: Res<BoltTally>) {
    // Meter container (bottom-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(bolt_counter_text(&tally)),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.65, 0.25)),
                Node {
                    margin: UiRect::bottom(Val::Px(6.0)),
                    ..default()
                },
                BoltCounter,
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Text::new("Wall ride"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.8, 0.8)),
                        Node {
                            width: Val::Px(80.0),
                            ..default()
                        },
                    ));

                    // Bar background
                    row.spawn((
                        Node {
                            width: Val::Px(150.0),
                            height: Val::Px(12.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                    ))
                    .with_children(|bg| {
                        bg.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.4, 0.8, 1.0)),
                            WallRideBar,
                        ));
                    });
                });
        });

    // Result banner (center of screen), hidden until the level ends
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.95)),
                Visibility::Hidden,
                LevelBanner,
            ));
        });
}

/// Shrink the meter as the wall ride is used up.
fn update_wall_ride_bar(
    player_query: Query<&PlayerMotor, With<Player>>,
    mut bar_query: Query<&mut Node, With<WallRideBar>>,
) {
    let Ok(motor) = player_query.get_single() else {
        return;
    };

    let fraction = motor.controller.wall_ride_remaining_fraction();
    for mut node in &mut bar_query {
        node.width = Val::Percent(fraction * 100.0);
    }
}

fn bolt_counter_text(tally: &BoltTally) -> String {
    format!("Bolts {}/{}", tally.collected, tally.total)
}

fn update_bolt_counter(
    tally: Res<BoltTally>,
    mut counter_query: Query<&mut Text, With<BoltCounter>>,
) {
    if !tally.is_changed() {
        return;
    }

    for mut text in &mut counter_query {
        text.0 = bolt_counter_text(&tally);
    }
}

fn banner_text(success: bool) -> &'static str {
    if success {
        "Circuit complete\nPress R to play again"
    } else {
        "The current fizzled\nPress R to try again"
    }
}

/// Reveal the banner when the level ends.
fn show_level_banner(
    mut level_end_events: EventReader<LevelEndEvent>,
    mut banner_query: Query<(&mut Text, &mut Visibility), With<LevelBanner>>,
) {
    let Some(event) = level_end_events.read().last() else {
        return;
    };

    for (mut text, mut visibility) in &mut banner_query {
        text.0 = banner_text(event.success).to_string();
        *visibility = Visibility::Visible;
    }
}

/// Remove HUD entities when leaving the level.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
