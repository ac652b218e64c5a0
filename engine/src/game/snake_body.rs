use std::collections::{HashSet, VecDeque};

use super::types::{Cell, Heading};

/// Occupied cells ordered tail-first, head-last, plus the direction of travel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeBody {
    cells: VecDeque<Cell>,
    occupied: HashSet<Cell>,
    heading: Heading,
}

impl SnakeBody {
    /// Lays out `length` cells starting at `tail` and stepping along `heading`,
    /// so the last cell is the head.
    pub fn new(tail: Cell, heading: Heading, length: usize) -> Self {
        let length = length.max(1);
        let mut cells = VecDeque::with_capacity(length + 1);
        let mut occupied = HashSet::with_capacity(length + 1);
        let mut cell = tail;
        for _ in 0..length {
            cells.push_back(cell);
            occupied.insert(cell);
            cell = cell.offset(heading);
        }

        Self {
            cells,
            occupied,
            heading,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn head(&self) -> Cell {
        *self.cells.back().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Cell {
        *self.cells.front().expect("Snake body should never be empty")
    }

    pub fn prospective_head(&self) -> Cell {
        self.head().offset(self.heading)
    }

    /// Moves one cell along the heading. The prospective head must already be known to be free.
    pub fn advance(&mut self, grow: bool) {
        let next_head = self.prospective_head();
        if !grow
            && let Some(tail) = self.cells.pop_front()
        {
            self.occupied.remove(&tail);
        }
        self.cells.push_back(next_head);
        self.occupied.insert(next_head);
    }

    /// Accepts only quarter turns; same-direction and reversing inputs are ignored.
    pub fn set_heading(&mut self, candidate: Option<Heading>) -> bool {
        match candidate {
            Some(heading) if self.heading.differs_on_both_axes(heading) => {
                self.heading = heading;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.occupied.contains(cell)
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + DoubleEndedIterator + '_ {
        self.cells.iter()
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.cells.iter().copied().collect()
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: Vec<Cell>, heading: Heading) -> Self {
        assert!(!cells.is_empty(), "test bodies need at least one cell");
        Self {
            occupied: cells.iter().copied().collect(),
            cells: cells.into(),
            heading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_body() -> SnakeBody {
        SnakeBody::new(Cell::new(2, 3), Heading::Right, 10)
    }

    #[test]
    fn test_new_lays_out_tail_first() {
        let body = default_body();
        assert_eq!(body.len(), 10);
        assert_eq!(body.tail(), Cell::new(2, 3));
        assert_eq!(body.head(), Cell::new(11, 3));
        assert_eq!(body.heading(), Heading::Right);
        let xs: Vec<i32> = body.cells().map(|c| c.x).collect();
        assert_eq!(xs, (2..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_new_along_vertical_heading() {
        let body = SnakeBody::new(Cell::new(5, 1), Heading::Down, 3);
        assert_eq!(body.to_vec(), vec![Cell::new(5, 1), Cell::new(5, 2), Cell::new(5, 3)]);
    }

    #[test]
    fn test_zero_length_is_clamped_to_one() {
        let body = SnakeBody::new(Cell::new(0, 0), Heading::Right, 0);
        assert_eq!(body.len(), 1);
        assert!(!body.is_empty());
    }

    #[test]
    fn test_prospective_head_does_not_mutate() {
        let body = default_body();
        assert_eq!(body.prospective_head(), Cell::new(12, 3));
        assert_eq!(body.prospective_head(), Cell::new(12, 3));
        assert_eq!(body.len(), 10);
        assert_eq!(body.head(), Cell::new(11, 3));
    }

    #[test]
    fn test_advance_without_growth_preserves_length() {
        let mut body = default_body();
        body.advance(false);
        assert_eq!(body.len(), 10);
        assert_eq!(body.tail(), Cell::new(3, 3));
        assert_eq!(body.head(), Cell::new(12, 3));
    }

    #[test]
    fn test_advance_updates_occupancy() {
        let mut body = default_body();
        body.advance(false);
        assert!(!body.contains(&Cell::new(2, 3)));
        assert!(body.contains(&Cell::new(12, 3)));
        assert!(body.contains(&Cell::new(3, 3)));
    }

    #[test]
    fn test_advance_with_growth_adds_one() {
        let mut body = default_body();
        let expected_head = body.prospective_head();
        body.advance(true);
        assert_eq!(body.len(), 11);
        assert_eq!(body.head(), expected_head);
        assert_eq!(body.tail(), Cell::new(2, 3));
    }

    #[test]
    fn test_set_heading_accepts_quarter_turn() {
        let mut body = default_body();
        assert!(body.set_heading(Some(Heading::Down)));
        assert_eq!(body.heading(), Heading::Down);
        body.advance(false);
        assert_eq!(body.head(), Cell::new(11, 4));
    }

    #[test]
    fn test_set_heading_rejects_same_direction() {
        let mut body = default_body();
        assert!(!body.set_heading(Some(Heading::Right)));
        assert_eq!(body.heading(), Heading::Right);
    }

    #[test]
    fn test_set_heading_rejects_reversal() {
        let mut body = default_body();
        assert!(!body.set_heading(Some(Heading::Left)));
        assert_eq!(body.heading(), Heading::Right);
    }

    #[test]
    fn test_set_heading_ignores_none() {
        let mut body = default_body();
        assert!(!body.set_heading(None));
        assert_eq!(body.heading(), Heading::Right);
    }

    #[test]
    fn test_set_heading_rule_for_every_pair() {
        for current in Heading::ALL {
            for candidate in Heading::ALL {
                let mut body = SnakeBody::new(Cell::new(10, 10), current, 3);
                let accepted = body.set_heading(Some(candidate));
                let (cx, cy) = current.delta();
                let (nx, ny) = candidate.delta();
                assert_eq!(accepted, cx != nx && cy != ny, "{:?} -> {:?}", current, candidate);
                let expected = if accepted { candidate } else { current };
                assert_eq!(body.heading(), expected);
            }
        }
    }
}
