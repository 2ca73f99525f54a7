//! Board pressure heatmap: signed attacker-count difference per square.

use std::collections::BTreeMap;

use crate::board::Board;
use crate::move_gen::attackers_to;
use crate::types::{square_name, Side};

/// For each square, White attackers minus Black attackers. Squares nobody
/// pressures are omitted.
pub fn heatmap(board: &Board) -> BTreeMap<String, i32> {
    let mut map = BTreeMap::new();
    for sq in 0..64u8 {
        let pressure = attackers_to(board, sq, Side::White) as i32
            - attackers_to(board, sq, Side::Black) as i32;
        if pressure != 0 {
            map.insert(square_name(sq), pressure);
        }
    }
    map
}
