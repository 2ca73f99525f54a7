//! Recursive negamax with alpha-beta pruning.

use super::control::SearchInterrupt;
use super::iterative::Searcher;
use super::ordering;
use crate::constants::MATE;
use crate::evaluation::evaluate;
use crate::move_gen::{generate_legal, in_check};
use crate::types::Move;

impl Searcher<'_> {
    /// Returns the side-to-move score of the current position and the line
    /// that produced it. Scores at a node with no legal moves are mate
    /// (adjusted by ply so nearer mates win) or stalemate zero.
    pub(super) fn negamax(
        &mut self,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<(i32, Vec<Move>), SearchInterrupt> {
        self.nodes += 1;

        if depth == 0 {
            return Ok((evaluate(self.board), Vec::new()));
        }

        let side = self.board.side_to_move();
        let mut moves = generate_legal(self.board);
        if moves.is_empty() {
            let score = if in_check(self.board, side) {
                -MATE + ply as i32
            } else {
                0
            };
            return Ok((score, Vec::new()));
        }
        ordering::order_moves(self.board, &mut moves);

        let mut pv = Vec::new();
        for mv in moves {
            self.check_interrupt()?;

            self.board.make(mv);
            let child = self.negamax(depth - 1, ply + 1, -beta, -alpha);
            self.board.unmake();
            let (child_score, child_pv) = child?;
            let score = -child_score;

            if score >= beta {
                self.cutoffs += 1;
                return Ok((beta, pv));
            }
            if score > alpha {
                alpha = score;
                pv.clear();
                pv.push(mv);
                pv.extend(child_pv);
            }
        }

        Ok((alpha, pv))
    }
}
