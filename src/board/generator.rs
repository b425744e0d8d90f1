use rand::Rng;
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::board::{Hex, HexLayout, is_valid_board, layout_coords};
use crate::types::Terrain;

/// Physical tile multiset: 4 Forest, 3 Hills, 4 Pasture, 4 Fields,
/// 3 Mountains and a single Desert.
pub const TERRAIN_POOL: [Terrain; 19] = [
    Terrain::Forest,
    Terrain::Forest,
    Terrain::Forest,
    Terrain::Forest,
    Terrain::Hills,
    Terrain::Hills,
    Terrain::Hills,
    Terrain::Pasture,
    Terrain::Pasture,
    Terrain::Pasture,
    Terrain::Pasture,
    Terrain::Fields,
    Terrain::Fields,
    Terrain::Fields,
    Terrain::Fields,
    Terrain::Mountains,
    Terrain::Mountains,
    Terrain::Mountains,
    Terrain::Desert,
];

/// Number-token multiset for the 18 non-Desert slots.
pub const NUMBER_POOL: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

/// Rejection-sampling cap. Random shuffles satisfy the constraints a
/// few percent of the time, so exhausting this bound indicates a logic
/// defect rather than bad luck.
const MAX_ATTEMPTS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("no placement-valid board found after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
}

/// Generate a placement-valid layout with the thread-local RNG.
pub fn generate_board_default() -> Result<HexLayout, BoardError> {
    let mut rng = thread_rng();
    generate_board(&mut rng)
}

/// Shuffle terrain and number tokens over the 19 slots until the
/// validator accepts the layout. Bounded; never hangs.
pub fn generate_board(rng: &mut impl Rng) -> Result<HexLayout, BoardError> {
    for _ in 0..MAX_ATTEMPTS {
        let layout = shuffled_layout(rng);
        if is_valid_board(&layout) {
            return Ok(layout);
        }
    }
    Err(BoardError::GenerationExhausted {
        attempts: MAX_ATTEMPTS,
    })
}

fn shuffled_layout(rng: &mut impl Rng) -> HexLayout {
    let mut terrains = TERRAIN_POOL;
    terrains.shuffle(rng);
    let mut numbers = NUMBER_POOL;
    numbers.shuffle(rng);

    let mut remaining = numbers.iter().copied();
    let hexes = layout_coords()
        .iter()
        .zip(terrains)
        .enumerate()
        .map(|(slot, (&coord, terrain))| Hex {
            slot: slot as u8,
            coord,
            terrain,
            number: if terrain.is_desert() {
                None
            } else {
                remaining.next()
            },
        })
        .collect();
    HexLayout::new(hexes)
}
