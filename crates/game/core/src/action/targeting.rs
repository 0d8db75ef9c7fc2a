//! Targeting validity and area-of-effect resolution.
//!
//! # Rules by style
//!
//! - **Point**: on the map, within Euclidean range, visible from the invoker
//!   and with an unobstructed trace. Relocating effects also need a free tile.
//! - **Cone**: an adjacent walkable tile in a cardinal direction.
//! - **Line**: any point other than the invoker's own tile.
//! - **None**: always valid.
//!
//! Walls occlude every area. Characters only stop single-target traces.

use crate::env::GameEnv;
use crate::geometry::{Direction, Point, burst, cone, line_points, ray, reach};
use crate::map::MapVisibility;
use crate::state::{Character, GameState, Skill, TargettingStyle};

/// Computes what `character` can currently see.
pub fn visibility_for(state: &GameState, env: &GameEnv<'_>, character: &Character) -> MapVisibility {
    MapVisibility::compute(
        state.map(),
        character.position,
        env.config().visibility_radius,
        false,
    )
}

/// Whether `skill` may be aimed at `target` by `invoker`.
pub fn is_valid_target(
    state: &GameState,
    env: &GameEnv<'_>,
    invoker: &Character,
    skill: &Skill,
    target: Point,
) -> bool {
    match skill.target_info.style {
        TargettingStyle::Point => {
            let visibility = visibility_for(state, env, invoker);
            is_valid_point_target(state, &visibility, invoker, skill, target)
        }
        _ => is_valid_shape_target(state, invoker, skill, target),
    }
}

fn is_valid_point_target(
    state: &GameState,
    visibility: &MapVisibility,
    invoker: &Character,
    skill: &Skill,
    target: Point,
) -> bool {
    let map = state.map();
    if !map.is_on_map(target) || !invoker.position.within_range(target, skill.target_info.range) {
        return false;
    }
    if !visibility.is_visible(target) || !map.is_path_clear(invoker.position, target) {
        return false;
    }
    !(skill.effect.relocates_invoker() && state.is_occupied(target))
}

fn is_valid_shape_target(state: &GameState, invoker: &Character, skill: &Skill, target: Point) -> bool {
    match skill.target_info.style {
        TargettingStyle::Cone => {
            state.map().is_walkable(target)
                && invoker.position.lattice_distance(target) == 1
                && Direction::between(invoker.position, target).is_some_and(Direction::is_cardinal)
        }
        TargettingStyle::Line => target != invoker.position,
        TargettingStyle::None | TargettingStyle::Point => true,
    }
}

/// Every point `skill` may currently be aimed at.
pub fn points_skill_can_target(
    state: &GameState,
    env: &GameEnv<'_>,
    invoker: &Character,
    skill: &Skill,
) -> Vec<Point> {
    let origin = invoker.position;
    match skill.target_info.style {
        TargettingStyle::Point => {
            let visibility = visibility_for(state, env, invoker);
            let range = reach(skill.target_info.range);
            let map = state.map();
            let max_x = reach(map.width()).saturating_sub(1);
            let max_y = reach(map.height()).saturating_sub(1);
            let mut points = Vec::new();
            // Scan only the part of the square that lies on the map.
            for y in origin.y.saturating_sub(range).max(0)..=origin.y.saturating_add(range).min(max_y) {
                for x in origin.x.saturating_sub(range).max(0)..=origin.x.saturating_add(range).min(max_x) {
                    let target = Point::new(x, y);
                    if is_valid_point_target(state, &visibility, invoker, skill, target) {
                        points.push(target);
                    }
                }
            }
            points
        }
        TargettingStyle::Cone => Direction::CARDINALS
            .into_iter()
            .map(|d| origin.step(d))
            .filter(|p| is_valid_shape_target(state, invoker, skill, *p))
            .collect(),
        TargettingStyle::Line => state.map().points().filter(|p| *p != origin).collect(),
        TargettingStyle::None => vec![origin],
    }
}

/// First character along the trace from `from` to `to`, else `to` itself.
pub(crate) fn first_hit_along(state: &GameState, from: Point, to: Point) -> Point {
    line_points(from, to)
        .into_iter()
        .find(|p| state.is_occupied(*p))
        .unwrap_or(to)
}

/// The points `skill` actually hits when aimed at `target`.
pub fn affected_points(state: &GameState, invoker: &Character, skill: &Skill, target: Point) -> Vec<Point> {
    let map = state.map();
    let origin = invoker.position;
    let info = skill.target_info;

    match info.style {
        TargettingStyle::Point if info.area == 0 => vec![first_hit_along(state, origin, target)],
        TargettingStyle::Point => burst(target, info.area)
            .into_iter()
            .filter(|p| map.is_on_map(*p) && map.is_reachable_from(target, *p))
            .collect(),
        TargettingStyle::Cone => match Direction::between(origin, target) {
            Some(direction) => cone(origin, direction, info.range)
                .into_iter()
                .filter(|p| map.is_reachable_from(origin, *p))
                .collect(),
            None => Vec::new(),
        },
        TargettingStyle::Line => match Direction::between(origin, target) {
            Some(direction) => ray(origin, direction, info.range)
                .into_iter()
                .filter(|p| map.is_reachable_from(origin, *p))
                .collect(),
            None => Vec::new(),
        },
        TargettingStyle::None => vec![origin],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::map::Map;
    use crate::state::{DamageInfo, EntityId, Health, SkillEffect, TargetInfo};

    fn hero_at(position: Point) -> Character {
        Character::player(EntityId(1), "Hero", position, Health::full(10))
    }

    fn bolt(range: u32, area: u32) -> Skill {
        Skill::new(
            EntityId(10),
            "Bolt",
            SkillEffect::Damage(DamageInfo::new(3)),
            TargetInfo::point(range, area),
        )
    }

    #[test]
    fn point_range_is_inclusive_and_walls_block() {
        let map = Map::from_rows(&[
            "#########",
            "#.......#",
            "#.......#",
            "#...#...#",
            "#.......#",
            "#########",
        ])
        .unwrap();
        let hero = hero_at(Point::new(1, 1));
        let state = GameState::new(map, hero.clone());
        let config = GameConfig::default();
        let env = GameEnv::new(&config);
        let skill = bolt(5, 0);

        assert!(is_valid_target(&state, &env, &hero, &skill, Point::new(6, 1)));
        assert!(!is_valid_target(&state, &env, &hero, &skill, Point::new(7, 1)));
        assert!(!is_valid_target(&state, &env, &hero, &skill, Point::new(5, 4)));
        assert!(!is_valid_target(&state, &env, &hero, &skill, Point::new(0, 1)));
    }

    #[test]
    fn burst_drops_wall_blocked_points() {
        let map = Map::from_rows(&[
            "#########",
            "#.......#",
            "#.......#",
            "#...#...#",
            "#.......#",
            "#.......#",
            "#.......#",
            "#########",
        ])
        .unwrap();
        let center = Point::new(3, 3);
        let state = GameState::new(map.clone(), hero_at(Point::new(1, 1)));
        let skill = bolt(8, 3);

        let points = affected_points(&state, &state.player, &skill, center);
        let expected: Vec<Point> = burst(center, 3)
            .into_iter()
            .filter(|p| map.is_reachable_from(center, *p))
            .collect();
        assert_eq!(points, expected);
        assert!(!points.contains(&Point::new(4, 3)));
        assert!(!points.contains(&Point::new(5, 3)));
        assert!(!points.contains(&Point::new(3, 0)));
        assert!(points.contains(&Point::new(3, 6)));
        assert!(points.len() < burst(center, 3).len());
    }

    #[test]
    fn single_target_stops_at_first_character() {
        let hero = hero_at(Point::new(1, 1));
        let blocker = Character::new(EntityId(2), "Goblin", Point::new(3, 1), Health::full(5));
        let state = GameState::new(Map::box_room(9, 3), hero.clone()).with_enemies(vec![blocker]);

        let points = affected_points(&state, &hero, &bolt(9, 0), Point::new(6, 1));
        assert_eq!(points, vec![Point::new(3, 1)]);

        let points = affected_points(&state, &hero, &bolt(9, 0), Point::new(2, 1));
        assert_eq!(points, vec![Point::new(2, 1)]);
    }

    #[test]
    fn cone_requires_cardinal_neighbour() {
        let hero = hero_at(Point::new(3, 3));
        let state = GameState::new(Map::box_room(7, 7), hero.clone());
        let config = GameConfig::default();
        let env = GameEnv::new(&config);
        let breath = Skill::new(
            EntityId(11),
            "Breath",
            SkillEffect::Damage(DamageInfo::new(2)),
            TargetInfo::cone(2),
        );

        assert!(is_valid_target(&state, &env, &hero, &breath, Point::new(3, 2)));
        assert!(!is_valid_target(&state, &env, &hero, &breath, Point::new(4, 2)));
        assert!(!is_valid_target(&state, &env, &hero, &breath, Point::new(3, 1)));
        assert_eq!(points_skill_can_target(&state, &env, &hero, &breath).len(), 4);

        let hit = affected_points(&state, &hero, &breath, Point::new(3, 2));
        assert_eq!(hit.len(), 4);
        assert!(hit.contains(&Point::new(2, 1)));
    }

    #[test]
    fn line_needs_a_direction_and_stops_at_walls() {
        let hero = hero_at(Point::new(1, 1));
        let state = GameState::new(Map::box_room(5, 3), hero.clone());
        let config = GameConfig::default();
        let env = GameEnv::new(&config);
        let lance = Skill::new(
            EntityId(12),
            "Lance",
            SkillEffect::Damage(DamageInfo::new(2)),
            TargetInfo::line(6),
        );

        assert!(!is_valid_target(&state, &env, &hero, &lance, Point::new(1, 1)));
        assert!(is_valid_target(&state, &env, &hero, &lance, Point::new(2, 1)));
        assert_eq!(
            affected_points(&state, &hero, &lance, Point::new(2, 1)),
            vec![Point::new(2, 1), Point::new(3, 1)]
        );
    }

    #[test]
    fn movement_targets_must_be_free() {
        let hero = hero_at(Point::new(1, 1));
        let goblin = Character::new(EntityId(2), "Goblin", Point::new(3, 1), Health::full(5));
        let state = GameState::new(Map::box_room(6, 3), hero.clone()).with_enemies(vec![goblin]);
        let config = GameConfig::default();
        let env = GameEnv::new(&config);
        let dash = Skill::new(EntityId(13), "Dash", SkillEffect::Movement, TargetInfo::point(3, 0));

        assert!(!is_valid_target(&state, &env, &hero, &dash, Point::new(3, 1)));
        assert!(is_valid_target(&state, &env, &hero, &dash, Point::new(2, 1)));
        let points = points_skill_can_target(&state, &env, &hero, &dash);
        assert_eq!(points, vec![Point::new(2, 1), Point::new(4, 1)]);
    }

    #[test]
    fn oversized_range_scans_only_the_map() {
        let hero = hero_at(Point::new(1, 1));
        let state = GameState::new(Map::box_room(6, 5), hero.clone());
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let huge = points_skill_can_target(&state, &env, &hero, &bolt(u32::MAX, 0));
        let plenty = points_skill_can_target(&state, &env, &hero, &bolt(10, 0));
        assert_eq!(huge, plenty);
        assert!(huge.contains(&Point::new(4, 3)));
    }
}
