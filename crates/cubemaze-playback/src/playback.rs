//! Frame-by-frame playback of a [`Trace`].
//!
//! A trace of `n` steps and a path of `m` cells plays as `n + m` frames:
//! one per step (expanded cell becomes [`Shade::Visited`], the neighbours it
//! touched [`Shade::Frontier`]), then one per path cell ([`Shade::Path`]).
//! Every applied frame pushes an undo record so playback can step back.

use cubemaze_core::{Bounds, GridGraph, Point3};
use cubemaze_paths::Trace;

use crate::palette::{Palette, Shade, Style};

/// Default delay between frames at speed 1.
pub const DEFAULT_INTERVAL_MS: u64 = 50;
/// Fastest speed multiplier.
pub const MAX_SPEED: u32 = 64;

/// Which part of the trace the next frame comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Exploring,
    Path,
    Done,
}

/// Replays a [`Trace`] over a per-cell [`Shade`] buffer.
#[derive(Debug, Clone)]
pub struct Playback {
    trace: Trace,
    bounds: Bounds,
    shades: Vec<Shade>,
    undo: Vec<Vec<(usize, Shade)>>,
    fidx: usize,
    auto_play: bool,
    /// Speed multiplier (1 = normal, 2 = 2x, etc.)
    speed: u32,
    interval_ms: u64,
    pending_ms: u64,
}

impl Playback {
    /// Start playback of `trace`, which must come from a search on `graph`.
    pub fn new(graph: &GridGraph, trace: Trace) -> Self {
        let shades = graph
            .cells()
            .iter()
            .map(|c| Shade::from_role(c.role()))
            .collect();
        Self {
            trace,
            bounds: graph.bounds(),
            shades,
            undo: Vec::new(),
            fidx: 0,
            auto_play: true,
            speed: 1,
            interval_ms: DEFAULT_INTERVAL_MS,
            pending_ms: 0,
        }
    }

    /// Set the delay between frames at speed 1 (at least 1 ms).
    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms.max(1);
        self
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Number of frames: one per step plus one per path cell.
    pub fn total_frames(&self) -> usize {
        self.trace.steps.len() + self.trace.path.len()
    }

    /// Number of frames applied so far.
    pub fn frame_index(&self) -> usize {
        self.fidx
    }

    pub fn phase(&self) -> Phase {
        if self.fidx < self.trace.steps.len() {
            Phase::Exploring
        } else if self.fidx < self.total_frames() {
            Phase::Path
        } else {
            Phase::Done
        }
    }

    pub fn is_finished(&self) -> bool {
        self.fidx >= self.total_frames()
    }

    pub fn toggle_pause(&mut self) {
        self.auto_play = !self.auto_play;
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn speed_more(&mut self) {
        self.speed = (self.speed * 2).min(MAX_SPEED);
    }

    pub fn speed_less(&mut self) {
        self.speed = (self.speed / 2).max(1);
    }

    /// Apply the next frame. Returns `false` when already at the end.
    pub fn next(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.apply(self.fidx);
        self.fidx += 1;
        true
    }

    /// Undo the last frame. Returns `false` when already at the start.
    pub fn previous(&mut self) -> bool {
        let Some(undo) = self.undo.pop() else {
            return false;
        };
        for (idx, shade) in undo.into_iter().rev() {
            self.shades[idx] = shade;
        }
        self.fidx -= 1;
        true
    }

    /// Move to frame `n` (clamped to the total).
    pub fn set_frame(&mut self, n: usize) {
        let n = n.min(self.total_frames());
        while self.fidx < n {
            self.next();
        }
        while self.fidx > n {
            self.previous();
        }
    }

    pub fn rewind(&mut self) {
        self.set_frame(0);
        self.pending_ms = 0;
    }

    /// Advance auto-play by `elapsed_ms` of wall time. Returns the number of
    /// frames applied.
    pub fn tick(&mut self, elapsed_ms: u64) -> usize {
        if !self.auto_play || self.is_finished() {
            return 0;
        }
        self.pending_ms = self
            .pending_ms
            .saturating_add(elapsed_ms.saturating_mul(u64::from(self.speed)));
        let due = (self.pending_ms / self.interval_ms) as usize;
        self.pending_ms %= self.interval_ms;

        let mut applied = 0;
        while applied < due && self.next() {
            applied += 1;
        }
        if self.is_finished() {
            self.pending_ms = 0;
            log::debug!("{} playback finished after {} frames", self.trace.algorithm, self.fidx);
        }
        applied
    }

    // -----------------------------------------------------------------------
    // Shade queries
    // -----------------------------------------------------------------------

    /// Shade of the cell at `p`, or `None` if out of bounds.
    pub fn shade(&self, p: Point3) -> Option<Shade> {
        self.bounds.index(p).map(|i| self.shades[i])
    }

    /// All shades in scan order.
    pub fn shades(&self) -> &[Shade] {
        &self.shades
    }

    /// Every cell with its current style.
    pub fn styled<'a>(&'a self, palette: &'a Palette) -> impl Iterator<Item = (Point3, Style)> + 'a {
        self.bounds
            .iter()
            .zip(self.shades.iter())
            .map(|(p, &s)| (p, palette.style(s)))
    }

    /// Text rows of the horizontal layer at height `y`, one row per `z`,
    /// one character per `x`.
    pub fn layer(&self, y: i32) -> Vec<String> {
        let dims = self.bounds.dims();
        (0..dims.depth)
            .map(|z| {
                (0..dims.width)
                    .map(|x| {
                        self.shade(Point3::new(x, y, z))
                            .map_or(' ', Shade::glyph)
                    })
                    .collect()
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Frame application
    // -----------------------------------------------------------------------

    fn apply(&mut self, frame: usize) {
        let mut undo = Vec::new();
        let steps = self.trace.steps.len();
        if frame < steps {
            let step = &self.trace.steps[frame];
            let cell = self.bounds.index(step.cell);
            let touched: Vec<usize> = step
                .neighbors
                .iter()
                .filter_map(|r| self.bounds.index(r.cell))
                .collect();
            if let Some(i) = cell {
                self.paint(i, Shade::Visited, &mut undo);
            }
            for i in touched {
                if self.shades[i] != Shade::Visited {
                    self.paint(i, Shade::Frontier, &mut undo);
                }
            }
        } else if let Some(i) = self
            .trace
            .path
            .get(frame - steps)
            .and_then(|&p| self.bounds.index(p))
        {
            self.paint(i, Shade::Path, &mut undo);
        }
        self.undo.push(undo);
    }

    fn paint(&mut self, idx: usize, shade: Shade, undo: &mut Vec<(usize, Shade)>) {
        let old = self.shades[idx];
        if old.is_fixed() || old == shade {
            return;
        }
        undo.push((idx, old));
        self.shades[idx] = shade;
    }
}
