// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn len(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn row_col(&self, idx: usize) -> (i8, i8) {
        ((idx / self.cols as usize) as i8, (idx % self.cols as usize) as i8)
    }

    // up, left, right, down; only those inside the grid.
    pub fn orthogonal_neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let (row, col) = self.row_col(idx);
        [(-1i8, 0i8), (0, -1), (0, 1), (1, 0)]
            .into_iter()
            .filter_map(move |(dr, dc)| {
                let (r, c) = (row + dr, col + dc);
                if r >= 0 && r < self.rows && c >= 0 && c < self.cols {
                    Some(self.at_row_col(r, c))
                } else {
                    None
                }
            })
    }
}
