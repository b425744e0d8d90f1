//! Save-string codec for a board layout.
//!
//! The wire format is 19 dash-separated tokens in slot order, one per
//! hex: the terrain code letter followed by the number token, or the
//! bare letter for the Desert. Example: `f5-h10-…-d`. The string
//! round-trips terrain and number losslessly for every valid layout.

use std::collections::HashMap;

use crate::board::{HEX_COUNT, Hex, HexLayout, NUMBER_POOL, TERRAIN_POOL, layout_coords};
use crate::types::Terrain;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("expected {HEX_COUNT} tiles, found {0}")]
    WrongTileCount(usize),
    #[error("empty tile token at slot {slot}")]
    EmptyToken { slot: u8 },
    #[error("unknown terrain code {code:?} at slot {slot}")]
    UnknownTerrain { slot: u8, code: char },
    #[error("invalid number token {token:?} at slot {slot}")]
    BadNumber { slot: u8, token: String },
    #[error("desert tile at slot {slot} carries a number")]
    NumberOnDesert { slot: u8 },
    #[error("tile at slot {slot} is missing its number")]
    MissingNumber { slot: u8 },
    #[error("terrain tiles do not form the standard multiset")]
    WrongTerrainMultiset,
    #[error("number tokens do not form the standard multiset")]
    WrongNumberMultiset,
}

pub fn encode_board(layout: &HexLayout) -> String {
    layout
        .iter()
        .map(|hex| match hex.number {
            Some(number) => format!("{}{number}", hex.terrain.code()),
            None => hex.terrain.code().to_string(),
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse a save string back into a layout. Validates token shape and
/// the tile/number multisets; adjacency validity is the caller's
/// concern (`is_valid_board`), so boards from other sources load
/// verbatim. Never mutates any existing state on failure.
pub fn decode_board(encoded: &str) -> Result<HexLayout, DecodeError> {
    let tokens: Vec<&str> = encoded.trim().split('-').collect();
    if tokens.len() != HEX_COUNT {
        return Err(DecodeError::WrongTileCount(tokens.len()));
    }

    let mut hexes = Vec::with_capacity(HEX_COUNT);
    for (slot, token) in tokens.into_iter().enumerate() {
        let slot = slot as u8;
        let mut chars = token.chars();
        let code = chars.next().ok_or(DecodeError::EmptyToken { slot })?;
        let terrain =
            Terrain::from_code(code).ok_or(DecodeError::UnknownTerrain { slot, code })?;

        let rest = chars.as_str();
        let number = if rest.is_empty() {
            None
        } else {
            let number: u8 = rest.parse().map_err(|_| DecodeError::BadNumber {
                slot,
                token: token.to_string(),
            })?;
            if !(2..=12).contains(&number) || number == 7 {
                return Err(DecodeError::BadNumber {
                    slot,
                    token: token.to_string(),
                });
            }
            Some(number)
        };

        match (terrain.is_desert(), number) {
            (true, Some(_)) => return Err(DecodeError::NumberOnDesert { slot }),
            (false, None) => return Err(DecodeError::MissingNumber { slot }),
            _ => {}
        }

        hexes.push(Hex {
            slot,
            coord: layout_coords()[slot as usize],
            terrain,
            number,
        });
    }

    check_multisets(&hexes)?;
    Ok(HexLayout::new(hexes))
}

fn check_multisets(hexes: &[Hex]) -> Result<(), DecodeError> {
    let mut terrain_counts: HashMap<Terrain, i32> = HashMap::new();
    for terrain in TERRAIN_POOL {
        *terrain_counts.entry(terrain).or_insert(0) += 1;
    }
    for hex in hexes {
        *terrain_counts.entry(hex.terrain).or_insert(0) -= 1;
    }
    if terrain_counts.values().any(|&count| count != 0) {
        return Err(DecodeError::WrongTerrainMultiset);
    }

    let mut number_counts: HashMap<u8, i32> = HashMap::new();
    for number in NUMBER_POOL {
        *number_counts.entry(number).or_insert(0) += 1;
    }
    for number in hexes.iter().filter_map(|hex| hex.number) {
        *number_counts.entry(number).or_insert(0) -= 1;
    }
    if number_counts.values().any(|&count| count != 0) {
        return Err(DecodeError::WrongNumberMultiset);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::board::generate_board;

    fn sample_layout(seed: u64) -> HexLayout {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_board(&mut rng).expect("generation succeeds")
    }

    #[test]
    fn encode_then_decode_round_trips() {
        for seed in [0, 7, 21, 1337] {
            let layout = sample_layout(seed);
            let encoded = encode_board(&layout);
            let decoded = decode_board(&encoded).expect("round trip decodes");
            assert_eq!(decoded, layout);
        }
    }

    #[test]
    fn encoded_string_has_one_token_per_slot() {
        let layout = sample_layout(2);
        let encoded = encode_board(&layout);
        assert_eq!(encoded.split('-').count(), HEX_COUNT);
        assert_eq!(encoded.matches('d').count(), 1);
    }

    #[test]
    fn rejects_wrong_tile_count() {
        assert_eq!(decode_board("f5-h10"), Err(DecodeError::WrongTileCount(2)));
    }

    #[test]
    fn rejects_unknown_terrain_code() {
        let layout = sample_layout(3);
        let encoded = encode_board(&layout);
        let tampered = format!("x{}", &encoded[1..]);
        assert_eq!(
            decode_board(&tampered),
            Err(DecodeError::UnknownTerrain { slot: 0, code: 'x' })
        );
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        let layout = sample_layout(4);
        let mut tokens: Vec<String> =
            encode_board(&layout).split('-').map(String::from).collect();
        tokens[0] = format!("{}13", &tokens[0][..1]);
        let err = decode_board(&tokens.join("-")).expect_err("13 is not a number token");
        assert!(matches!(err, DecodeError::BadNumber { slot: 0, .. }));

        tokens[0] = format!("{}7", &tokens[0][..1]);
        let err = decode_board(&tokens.join("-")).expect_err("7 is not a number token");
        assert!(matches!(err, DecodeError::BadNumber { slot: 0, .. }));
    }

    #[test]
    fn rejects_desert_with_number_and_tile_without_number() {
        let layout = sample_layout(5);
        let desert_slot = layout.desert_slot().expect("desert exists") as usize;
        let mut tokens: Vec<String> =
            encode_board(&layout).split('-').map(String::from).collect();

        let mut with_number = tokens.clone();
        with_number[desert_slot] = "d8".to_string();
        let err = decode_board(&with_number.join("-")).expect_err("desert may not carry a number");
        assert!(matches!(err, DecodeError::NumberOnDesert { .. }));

        let resource_slot = if desert_slot == 0 { 1 } else { 0 };
        tokens[resource_slot] = tokens[resource_slot][..1].to_string();
        let err = decode_board(&tokens.join("-")).expect_err("resource tile needs a number");
        assert!(matches!(err, DecodeError::MissingNumber { .. }));
    }

    #[test]
    fn rejects_wrong_multisets() {
        let layout = sample_layout(6);
        let desert_slot = layout.desert_slot().expect("desert exists") as usize;
        let tokens: Vec<String> =
            encode_board(&layout).split('-').map(String::from).collect();

        // Two deserts: terrain multiset breaks first.
        let mut two_deserts = tokens.clone();
        let resource_slot = if desert_slot == 0 { 1 } else { 0 };
        two_deserts[resource_slot] = "d".to_string();
        assert_eq!(
            decode_board(&two_deserts.join("-")),
            Err(DecodeError::WrongTerrainMultiset)
        );

        // Swap one number for a duplicate of another: number multiset breaks.
        let (a, b) = (0..HEX_COUNT)
            .filter(|&slot| slot != desert_slot)
            .flat_map(|a| {
                (a + 1..HEX_COUNT)
                    .filter(|&b| b != desert_slot)
                    .map(move |b| (a, b))
            })
            .find(|&(a, b)| tokens[a][1..] != tokens[b][1..])
            .expect("two slots with different numbers always exist");
        let mut dup_number = tokens.clone();
        dup_number[a] = format!("{}{}", &tokens[a][..1], &tokens[b][1..]);
        assert_eq!(
            decode_board(&dup_number.join("-")),
            Err(DecodeError::WrongNumberMultiset)
        );
    }
}
