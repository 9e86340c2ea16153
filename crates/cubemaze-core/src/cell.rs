//! Lattice cells and their search state.

use crate::geom::Point3;

/// Sentinel distance meaning "not reached yet". Larger than any path sum.
pub const UNREACHABLE: u32 = u32::MAX;

/// What a cell is, as far as searching is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Start,
    End,
    Wall,
    Open,
}

impl Role {
    /// Start, end and open cells can be walked through.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Role::Wall)
    }

    /// Start and end never change once the grid is built.
    #[inline]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Role::Start | Role::End)
    }
}

/// One lattice cell.
///
/// `pos` and `role` are owned by the grid; the remaining fields are per-run
/// search state, written by the search algorithms and restored by
/// [`Cell::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pos: Point3,
    role: Role,
    pub visited: bool,
    pub distance: u32,
    pub heuristic: f64,
    pub parent: Option<usize>,
}

impl Cell {
    /// A cell in its initial search state.
    pub fn new(pos: Point3, role: Role) -> Self {
        Self {
            pos,
            role,
            visited: false,
            distance: if role == Role::Start { 0 } else { UNREACHABLE },
            heuristic: f64::INFINITY,
            parent: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Point3 {
        self.pos
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn is_passable(&self) -> bool {
        self.role.is_passable()
    }

    /// Whether a search has assigned a finite distance.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.distance != UNREACHABLE
    }

    /// Restore the initial search state, keeping position and role.
    pub fn reset(&mut self) {
        *self = Cell::new(self.pos, self.role);
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let s = Cell::new(Point3::ZERO, Role::Start);
        assert_eq!(s.distance, 0);
        assert!(!s.visited);
        assert!(s.heuristic.is_infinite());
        let w = Cell::new(Point3::new(1, 0, 0), Role::Wall);
        assert_eq!(w.distance, UNREACHABLE);
        assert!(!w.is_passable());
        assert!(!w.is_reached());
    }

    #[test]
    fn reset_restores_snapshot() {
        let mut c = Cell::new(Point3::new(0, 1, 0), Role::Open);
        let fresh = c.clone();
        c.visited = true;
        c.distance = 7;
        c.heuristic = 1.5;
        c.parent = Some(3);
        c.reset();
        assert_eq!(c, fresh);
    }

    #[test]
    fn fixed_roles() {
        assert!(Role::Start.is_fixed());
        assert!(Role::End.is_fixed());
        assert!(!Role::Open.is_fixed());
        assert!(Role::End.is_passable());
    }
}
