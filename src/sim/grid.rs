//! Tile grid loading
//!
//! A level is a comma-separated table of integer tile codes, one line per
//! row. The grid has fixed declared dimensions: every cell starts at
//! [`EMPTY`] and is overwritten by the corresponding field of the source.
//! Shorter sources leave trailing cells empty; longer ones are rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Code of a cell with nothing in it
pub const EMPTY: i32 = -1;

/// Row-major grid of tile codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl TileGrid {
    /// A grid with every cell empty
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    /// Build a grid from literal rows (ragged rows are padded with empty cells)
    pub fn from_rows(rows: &[&[i32]]) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut grid = Self::empty(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                grid.cells[r * cols + c] = code;
            }
        }
        grid
    }

    /// Parse comma-separated level data into a `rows` x `cols` grid
    pub fn parse(text: &str, rows: usize, cols: usize) -> Result<Self, LoadError> {
        let mut grid = Self::empty(rows, cols);

        // Trailing blank lines carry no data
        let lines: Vec<&str> = text.lines().collect();
        let used = lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);

        for (r, line) in lines[..used].iter().enumerate() {
            if r >= rows {
                return Err(LoadError::TooManyRows { limit: rows });
            }
            if line.trim().is_empty() {
                continue;
            }
            for (c, field) in line.split(',').enumerate() {
                if c >= cols {
                    return Err(LoadError::TooManyFields { row: r, limit: cols });
                }
                let field = field.trim();
                let code = field.parse::<i32>().map_err(|source| LoadError::BadField {
                    row: r,
                    col: c,
                    value: field.to_string(),
                    source,
                })?;
                grid.cells[r * cols + c] = code;
            }
        }

        Ok(grid)
    }

    /// Read `level{level_no}_data.csv` from `dir`
    pub fn load(dir: &Path, level_no: u32, rows: usize, cols: usize) -> Result<Self, LoadError> {
        let path = dir.join(format!("level{level_no}_data.csv"));
        Self::load_path(&path, rows, cols)
    }

    /// Read a grid from an explicit file path
    pub fn load_path(path: &Path, rows: usize, cols: usize) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Resource {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = Self::parse(&text, rows, cols)?;
        log::info!("Loaded {} ({}x{})", path.display(), rows, cols);
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Code at `(row, col)`, `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Every cell as `(row, col, code)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &code)| (i / cols, i % cols, code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_fills_declared_cells() {
        let grid = TileGrid::parse("0,1,-1\n15,16,2\n", 3, 4).unwrap();
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(0, 1), Some(1));
        assert_eq!(grid.get(1, 0), Some(15));
        assert_eq!(grid.get(1, 2), Some(2));
        // Not covered by the source
        assert_eq!(grid.get(0, 3), Some(EMPTY));
        assert_eq!(grid.get(2, 0), Some(EMPTY));
        // Outside the grid
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 4), None);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "1,2,3\n4,5,6\n";
        assert_eq!(
            TileGrid::parse(text, 2, 3).unwrap(),
            TileGrid::parse(text, 2, 3).unwrap()
        );
    }

    #[test]
    fn test_parse_trims_whitespace_and_crlf() {
        let grid = TileGrid::parse(" 3 , 4\r\n5,6\r\n", 2, 2).unwrap();
        assert_eq!(grid, TileGrid::from_rows(&[&[3, 4], &[5, 6]]));
    }

    #[test]
    fn test_bad_field() {
        let err = TileGrid::parse("0,x,1\n", 1, 3).unwrap_err();
        assert!(err.is_format());
        match err {
            LoadError::BadField { row, col, value, .. } => {
                assert_eq!((row, col), (0, 1));
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_too_many_rows() {
        let err = TileGrid::parse("0\n0\n0\n", 2, 1).unwrap_err();
        assert!(matches!(err, LoadError::TooManyRows { limit: 2 }));
    }

    #[test]
    fn test_too_many_fields_does_not_spill() {
        let err = TileGrid::parse("0,0,0\n", 2, 2).unwrap_err();
        assert!(matches!(err, LoadError::TooManyFields { row: 0, limit: 2 }));
    }

    #[test]
    fn test_missing_resource() {
        let err = TileGrid::load(Path::new("no/such/dir"), 1, 16, 438).unwrap_err();
        assert!(!err.is_format());
        assert!(matches!(err, LoadError::Resource { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("tile-shooter-grid-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("level7_data.csv"), "-1,0\n15,1\n").unwrap();

        let grid = TileGrid::load(&dir, 7, 2, 2).unwrap();
        assert_eq!(grid, TileGrid::from_rows(&[&[-1, 0], &[15, 1]]));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_cells_iteration_order() {
        let grid = TileGrid::from_rows(&[&[1, 2], &[3, 4]]);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells, vec![(0, 0, 1), (0, 1, 2), (1, 0, 3), (1, 1, 4)]);
    }

    proptest! {
        #[test]
        fn parse_matches_source_table(
            table in proptest::collection::vec(proptest::collection::vec(-1i32..25, 1..8), 1..6)
        ) {
            let text: String = table
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(","))
                .collect::<Vec<_>>()
                .join("\n");
            let grid = TileGrid::parse(&text, 6, 8).unwrap();

            for r in 0..6 {
                for c in 0..8 {
                    let expected = table.get(r).and_then(|row| row.get(c)).copied().unwrap_or(EMPTY);
                    prop_assert_eq!(grid.get(r, c), Some(expected));
                }
            }
        }
    }
}
