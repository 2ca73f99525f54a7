//! The iterative-deepening driver and root-move loop.

use std::collections::BTreeMap;

use tracing::debug;

use super::control::{SearchControl, SearchInterrupt};
use super::{ordering, SearchOptions, SearchReport, SearchSnapshot};
use crate::api::Status;
use crate::board::Board;
use crate::constants::{INFINITY, MATE};
use crate::evaluation::{heatmap, piece_breakdown, piece_values, PieceBreakdown};
use crate::move_gen::{generate_legal, in_check};
use crate::stream::SnapshotPublisher;
use crate::types::Move;

/// Results of the last fully completed depth.
struct Committed {
    depth: u32,
    best_move: Option<Move>,
    best_score: i32,
    pv: Vec<Move>,
    candidates: BTreeMap<String, i32>,
}

/// Evaluator artifacts of the root position. The root never changes during
/// a search, so these are computed once up front and cloned into records.
struct RootArtifacts {
    status: Status,
    piece_values: BTreeMap<String, i32>,
    piece_breakdown: BTreeMap<String, PieceBreakdown>,
    heatmap: BTreeMap<String, i32>,
}

pub(super) struct Searcher<'a> {
    pub(super) board: &'a mut Board,
    control: SearchControl,
    publisher: Option<&'a mut SnapshotPublisher>,
    pub(super) nodes: u64,
    pub(super) cutoffs: u64,
    current_move: Option<String>,
    committed: Committed,
    artifacts: RootArtifacts,
}

impl<'a> Searcher<'a> {
    pub(super) fn new(
        board: &'a mut Board,
        options: &SearchOptions,
        publisher: Option<&'a mut SnapshotPublisher>,
    ) -> Searcher<'a> {
        let control = SearchControl::new(options.time_limit_ms);
        let status = root_status(board);
        let artifacts = RootArtifacts {
            status,
            piece_values: piece_values(board),
            piece_breakdown: piece_breakdown(board),
            heatmap: heatmap(board),
        };
        Searcher {
            board,
            control,
            publisher,
            nodes: 0,
            cutoffs: 0,
            current_move: None,
            committed: Committed {
                depth: 0,
                best_move: None,
                best_score: 0,
                pv: Vec::new(),
                candidates: BTreeMap::new(),
            },
            artifacts,
        }
    }

    pub(super) fn run(mut self, max_depth: u32) -> SearchReport {
        debug!(max_depth, "search started");

        for depth in 1..=max_depth {
            match self.search_root(depth) {
                Ok(committed) => {
                    let terminal_root = committed.best_move.is_none();
                    self.committed = committed;
                    debug!(
                        depth,
                        score = self.committed.best_score,
                        nodes = self.nodes,
                        "depth committed"
                    );
                    self.publish_progress();
                    if terminal_root {
                        break;
                    }
                }
                Err(interrupt) => {
                    debug!(depth, ?interrupt, "search interrupted");
                    break;
                }
            }
        }

        debug!(
            depth = self.committed.depth,
            nodes = self.nodes,
            elapsed_ms = self.control.elapsed_ms(),
            "search finished"
        );
        self.report()
    }

    /// Explores every root move at the given depth with a full window.
    /// Root moves never fail high, so each candidate keeps its score.
    fn search_root(&mut self, depth: u32) -> Result<Committed, SearchInterrupt> {
        let side = self.board.side_to_move();
        let mut moves = generate_legal(self.board);
        if moves.is_empty() {
            let best_score = if in_check(self.board, side) { -MATE } else { 0 };
            return Ok(Committed {
                depth,
                best_move: None,
                best_score,
                pv: Vec::new(),
                candidates: BTreeMap::new(),
            });
        }
        ordering::order_moves(self.board, &mut moves);

        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<(Move, i32, Vec<Move>)> = None;
        let mut candidates = BTreeMap::new();

        for mv in moves {
            self.check_interrupt()?;
            self.current_move = Some(mv.long_algebraic());

            self.board.make(mv);
            let child = self.negamax(depth - 1, 1, -beta, -alpha);
            self.board.unmake();
            let (child_score, child_pv) = child?;
            let score = -child_score;

            candidates.insert(mv.long_algebraic(), score);

            let improved = match &best {
                None => true,
                Some((_, best_score, _)) => score > *best_score,
            };
            if improved {
                let mut pv = Vec::with_capacity(child_pv.len() + 1);
                pv.push(mv);
                pv.extend(child_pv);
                best = Some((mv, score, pv));
            }
            if score > alpha {
                alpha = score;
            }

            self.publish_progress();
        }

        let Some((best_move, best_score, pv)) = best else {
            // Unreachable: the move list was non-empty.
            return Err(SearchInterrupt::Timeout);
        };
        Ok(Committed {
            depth,
            best_move: Some(best_move),
            best_score,
            pv,
            candidates,
        })
    }

    /// Raises an interrupt once the budget is spent or every stream
    /// consumer is gone. Called before descending into any move.
    pub(super) fn check_interrupt(&self) -> Result<(), SearchInterrupt> {
        if self.control.expired() {
            return Err(SearchInterrupt::Timeout);
        }
        if let Some(publisher) = &self.publisher {
            if publisher.is_closed() {
                return Err(SearchInterrupt::Cancelled);
            }
        }
        Ok(())
    }

    fn publish_progress(&mut self) {
        if self.publisher.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(publisher) = self.publisher.as_deref_mut() {
            publisher.offer(snapshot);
        }
    }

    fn nps(&self) -> u64 {
        self.nodes.saturating_mul(1000) / self.control.elapsed_ms().max(1)
    }

    fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            depth: self.committed.depth,
            eval: self.committed.best_score as f64 / 100.0,
            eval_cp: self.committed.best_score,
            nodes: self.nodes,
            nps: self.nps(),
            cutoffs: self.cutoffs,
            elapsed_ms: self.control.elapsed_ms(),
            current_move: self.current_move.clone(),
            pv: self.committed.pv.iter().map(|m| m.long_algebraic()).collect(),
            candidate_moves: self.committed.candidates.clone(),
            piece_values: self.artifacts.piece_values.clone(),
            piece_breakdown: self.artifacts.piece_breakdown.clone(),
            heatmap: self.artifacts.heatmap.clone(),
        }
    }

    fn report(self) -> SearchReport {
        SearchReport {
            depth: self.committed.depth,
            eval: self.committed.best_score as f64 / 100.0,
            eval_cp: self.committed.best_score,
            nodes: self.nodes,
            nps: self.nps(),
            cutoffs: self.cutoffs,
            elapsed_ms: self.control.elapsed_ms(),
            current_move: self.current_move,
            pv: self.committed.pv.iter().map(|m| m.long_algebraic()).collect(),
            best_move: self.committed.best_move.map(Move::long_algebraic),
            candidate_moves: self.committed.candidates,
            piece_values: self.artifacts.piece_values,
            piece_breakdown: self.artifacts.piece_breakdown,
            heatmap: self.artifacts.heatmap,
            status: self.artifacts.status,
        }
    }
}

fn root_status(board: &mut Board) -> Status {
    if generate_legal(board).is_empty() {
        if in_check(board, board.side_to_move()) {
            Status::Checkmate
        } else {
            Status::Stalemate
        }
    } else {
        Status::Ongoing
    }
}
