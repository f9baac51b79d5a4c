//! Floor generation.
//!
//! Maps are grown by a random walk from the entrance: each new room is
//! attached next to the most recently grown one, in a random direction, on
//! the non-negative quadrant. The boss room is one of the three rooms
//! farthest from the entrance by walking distance.

use std::collections::{HashMap, VecDeque};

use crate::env::Dice;
use crate::state::{BoundingBox, Tile};

const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Placement attempts per room before its parent is given up on.
const ATTEMPTS: u32 = 10;

/// Boss room is drawn from this many farthest rooms.
const BOSS_CANDIDATES: usize = 3;

/// Generates a floor of up to `count` rooms.
///
/// The first tile is the entrance: on the top edge, already cleared. When
/// `place_boss` is set, exactly one other tile is marked as the boss room.
/// A walk that boxes itself in may stop short of `count`.
pub fn generate_tiles(count: usize, place_boss: bool, dice: &mut Dice<'_>) -> Vec<Tile> {
    let count = count.max(1);
    let start = Tile {
        cleared_room: true,
        ..Tile::new(dice.below(count) as i32, 0)
    };

    let mut tiles = vec![start];
    let mut frontier = vec![start];
    while tiles.len() < count {
        let Some(&parent) = frontier.last() else {
            break;
        };
        let mut placed = false;
        for _ in 0..ATTEMPTS {
            let (dx, dy) = DIRECTIONS[dice.below(DIRECTIONS.len())];
            let (x, y) = (parent.x + dx, parent.y + dy);
            if x < 0 || y < 0 || tiles.iter().any(|t| t.at(x, y)) {
                continue;
            }
            let tile = Tile::new(x, y);
            tiles.push(tile);
            frontier.push(tile);
            placed = true;
            break;
        }
        if !placed {
            frontier.pop();
        }
    }

    if place_boss && tiles.len() > 1 {
        let mut by_distance: Vec<(usize, u32)> = distances(&tiles).into_iter().collect();
        by_distance.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let candidates: Vec<usize> = by_distance
            .into_iter()
            .filter(|(index, _)| *index != 0)
            .take(BOSS_CANDIDATES)
            .map(|(index, _)| index)
            .collect();
        let boss = candidates[dice.below(candidates.len())];
        tiles[boss].is_boss_room = true;
    }

    tracing::debug!(rooms = tiles.len(), requested = count, "floor generated");
    tiles
}

/// Walking distance from the entrance (index 0) to every reachable tile.
fn distances(tiles: &[Tile]) -> HashMap<usize, u32> {
    let mut seen = HashMap::from([(0, 0)]);
    let mut queue = VecDeque::from([0]);
    while let Some(current) = queue.pop_front() {
        let distance = seen[&current];
        for (index, tile) in tiles.iter().enumerate() {
            if !seen.contains_key(&index) && tile.is_adjacent(&tiles[current]) {
                seen.insert(index, distance + 1);
                queue.push_back(index);
            }
        }
    }
    seen
}

/// Smallest box containing every tile, in tile units.
pub fn bounding_box(tiles: &[Tile]) -> BoundingBox {
    let Some(first) = tiles.first() else {
        return BoundingBox::default();
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for tile in tiles {
        min_x = min_x.min(tile.x);
        max_x = max_x.max(tile.x);
        min_y = min_y.min(tile.y);
        max_y = max_y.max(tile.y);
    }
    BoundingBox {
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
        offset_x: min_x,
        offset_y: min_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn floors_are_connected_and_unique() {
        let rng = PcgRng;
        for seed in 0..20 {
            let mut dice = Dice::new(&rng, seed);
            let tiles = generate_tiles(15, true, &mut dice);

            assert!(tiles[0].cleared_room);
            assert_eq!(tiles[0].y, 0);
            assert!(tiles.iter().all(|t| t.x >= 0 && t.y >= 0));

            let reachable = distances(&tiles);
            assert_eq!(reachable.len(), tiles.len());

            for (i, a) in tiles.iter().enumerate() {
                assert!(!tiles[i + 1..].iter().any(|b| b.at(a.x, a.y)));
            }
            assert_eq!(tiles.iter().filter(|t| t.is_boss_room).count(), 1);
            assert!(!tiles[0].is_boss_room);
        }
    }

    #[test]
    fn no_boss_when_already_defeated() {
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 5);
        let tiles = generate_tiles(8, false, &mut dice);
        assert!(tiles.iter().all(|t| !t.is_boss_room));
    }

    #[test]
    fn bounding_box_covers_tiles() {
        let tiles = [Tile::new(2, 0), Tile::new(2, 1), Tile::new(3, 1), Tile::new(3, 2)];
        assert_eq!(
            bounding_box(&tiles),
            BoundingBox {
                width: 2,
                height: 3,
                offset_x: 2,
                offset_y: 0,
            }
        );
        assert_eq!(bounding_box(&[]), BoundingBox::default());
    }
}
