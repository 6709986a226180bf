//! Layout parsing functionality.

use crate::error::ParseError;
use crate::map::grid::{TileGrid, TileValue};

/// Parser for turning raw layouts into a [`TileGrid`].
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a tile value.
    ///
    /// # Character Mapping
    ///
    /// - `#` - Wall
    /// - `.` - Dot
    /// - ` ` - Empty
    /// - `=` - Ghost house
    /// - `o` - Pill
    pub fn parse_character(c: char) -> Result<TileValue, ParseError> {
        match c {
            '#' => Ok(TileValue::Wall),
            '.' => Ok(TileValue::Dot),
            ' ' => Ok(TileValue::Empty),
            '=' => Ok(TileValue::GhostHouse),
            'o' => Ok(TileValue::Pill),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses rows of raw tile codes.
    pub fn parse_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<TileGrid, ParseError> {
        Self::collect(rows.iter().map(|row| {
            row.as_ref()
                .iter()
                .map(|&code| TileValue::try_from(code))
                .collect::<Result<Vec<_>, _>>()
        }))
    }

    /// Parses a character board, one string per row.
    pub fn parse_board<R: AsRef<str>>(rows: &[R]) -> Result<TileGrid, ParseError> {
        Self::collect(
            rows.iter()
                .map(|row| row.as_ref().chars().map(Self::parse_character).collect::<Result<Vec<_>, _>>()),
        )
    }

    fn collect(rows: impl Iterator<Item = Result<Vec<TileValue>, ParseError>>) -> Result<TileGrid, ParseError> {
        let mut width = None;
        let mut height = 0u32;
        let mut tiles = Vec::new();

        for (index, row) in rows.enumerate() {
            let row = row?;
            let expected = *width.get_or_insert(row.len());
            if row.len() != expected {
                return Err(ParseError::RaggedRow {
                    row: index,
                    expected,
                    found: row.len(),
                });
            }
            tiles.extend(row);
            height += 1;
        }

        match width {
            Some(width) if width > 0 => Ok(TileGrid::from_values(width as u32, height, tiles)),
            _ => Err(ParseError::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;

    #[test]
    fn test_parse_default_board() {
        let grid = MapTileParser::parse_codes(&RAW_BOARD).unwrap();
        assert_eq!(grid.width(), 19);
        assert_eq!(grid.height(), 22);
        assert_eq!(grid.count(TileValue::Dot), 178);
    }

    #[test]
    fn test_parse_board_characters() {
        let grid = MapTileParser::parse_board(&["#.o", "= #"]).unwrap();
        assert_eq!(grid.codes(), vec![0, 1, 4, 3, 2, 0]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = MapTileParser::parse_board(&["###", "##"]);
        assert_eq!(
            result,
            Err(ParseError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_empty_board_rejected() {
        let rows: [&str; 0] = [];
        assert_eq!(MapTileParser::parse_board(&rows), Err(ParseError::Empty));
        assert_eq!(MapTileParser::parse_board(&[""]), Err(ParseError::Empty));
    }

    #[test]
    fn test_unknown_input_rejected() {
        assert_eq!(MapTileParser::parse_board(&["#x#"]), Err(ParseError::UnknownCharacter('x')));
        assert_eq!(MapTileParser::parse_codes(&[[0u8, 9]]), Err(ParseError::UnknownTileCode(9)));
    }
}
