//! Plain-text snapshot of a match.

use arena_core::{GameState, Point};

/// Terrain rows with `@` for the player and the first letter of each enemy's name.
pub fn map_rows(state: &GameState) -> Vec<String> {
    let map = state.map();
    (0..map.height() as i32)
        .map(|y| {
            (0..map.width() as i32)
                .map(|x| glyph_at(state, Point::new(x, y)))
                .collect()
        })
        .collect()
}

fn glyph_at(state: &GameState, point: Point) -> char {
    match state.character_at(point) {
        Some(c) if c.is_player => '@',
        Some(c) => c.name.chars().next().unwrap_or('?'),
        None => state
            .map()
            .tile(point)
            .map_or(' ', |tile| tile.terrain.glyph()),
    }
}

pub fn status_line(state: &GameState) -> String {
    format!(
        "round {} | {} {}/{} hp | {} enemies | {} scripts",
        state.round,
        state.player.name,
        state.player.health.current,
        state.player.health.maximum,
        state.enemies.len(),
        state.scripts.len(),
    )
}
