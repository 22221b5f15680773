//! Building [`Board`](crate::Board)s from rows of cell descriptors.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::location::{Coord, Location};
use crate::pipe::{Pipe, PipeKind};

/// One cell of board input: a kind tag (`"T"`, `"I"`, `"L"`, or `"E"`) and an initial rotation index.
///
/// Descriptors are validated only when handed to a [`BoardBuilder`], so malformed input deserializes fine and is rejected there.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CellDescriptor {
    /// The kind tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// The initial rotation index.
    pub index: i64,
}

impl CellDescriptor {
    /// Shorthand for a descriptor of `kind` at rotation `index`.
    pub fn new(kind: PipeKind, index: i64) -> Self {
        Self {
            kind: kind.to_string(),
            index,
        }
    }
}

impl From<&Pipe> for CellDescriptor {
    fn from(pipe: &Pipe) -> Self {
        Self::new(pipe.kind, pipe.rotation as i64)
    }
}

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// A cell's kind tag is not one of `T`, `I`, `L`, or `E`.
    UnknownKind {
        /// Where the bad cell is.
        location: Location,
        /// The tag as given.
        tag: String,
    },
    /// A cell's rotation index is outside `[0, 4)`, or `[0, 2)` for a straight pipe.
    RotationOutOfRange {
        /// Where the bad cell is.
        location: Location,
        /// The cell's kind.
        kind: PipeKind,
        /// The index as given.
        index: i64,
    },
    /// A row's length differs from the first row's.
    RaggedRow {
        /// The offending row.
        row: Coord,
        /// Length of the first row.
        expected: Coord,
        /// Length of the offending row.
        found: Coord,
    },
    /// No cells at all, or a row with no cells.
    Empty,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKind { location, tag } => write!(f, "unknown pipe type {tag:?} at {location}"),
            Self::RotationOutOfRange { location, kind, index } => {
                write!(f, "rotation index {index} out of range for {kind} pipe at {location}")
            }
            Self::RaggedRow { row, expected, found } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::Empty => write!(f, "board has no cells"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A builder for rectangular [`Board`]s, fed one row of [`CellDescriptor`]s at a time.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug, Default)]
pub struct BoardBuilder {
    rows: Vec<Vec<Pipe>>,
    invalid_reasons: Vec<ValidationError>,
}

impl BoardBuilder {
    /// Construct an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a builder and feed it every row of `rows`.
    pub fn from_descriptors(rows: &[Vec<CellDescriptor>]) -> Self {
        let mut builder = Self::new();
        for row in rows {
            builder.add_row(row);
        }

        builder
    }

    /// Append a row below those already added.
    ///
    /// May cause the builder to enter an invalid state if a cell is malformed or the row's length differs from the first row's.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_row(&mut self, row: &[CellDescriptor]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let row_index = self.rows.len();
        if row.is_empty() {
            self.invalid_reasons.push(ValidationError::Empty);
            return self;
        }
        if let Some(first) = self.rows.first() {
            if first.len() != row.len() {
                self.invalid_reasons.push(ValidationError::RaggedRow {
                    row: row_index,
                    expected: first.len(),
                    found: row.len(),
                });
                return self;
            }
        }

        let mut pipes = Vec::with_capacity(row.len());
        for (col, descriptor) in row.iter().enumerate() {
            match Self::parse_cell(Location(row_index, col), descriptor) {
                Ok(pipe) => pipes.push(pipe),
                Err(reason) => {
                    self.invalid_reasons.push(reason);
                    return self;
                }
            }
        }

        self.rows.push(pipes);
        self
    }

    fn parse_cell(location: Location, descriptor: &CellDescriptor) -> Result<Pipe, ValidationError> {
        let kind = PipeKind::from_str(&descriptor.kind).map_err(|_| ValidationError::UnknownKind {
            location,
            tag: descriptor.kind.clone(),
        })?;

        u8::try_from(descriptor.index)
            .ok()
            .and_then(|rotation| Pipe::new(kind, rotation))
            .ok_or(ValidationError::RotationOutOfRange {
                location,
                kind,
                index: descriptor.index,
            })
    }

    /// Check the validity of this builder, ensuring no [`ValidationError`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<ValidationError>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<ValidationError>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, or has no rows, a reference to a [`Vec`] of [`ValidationError`] will indicate why.
    pub fn build(&mut self) -> Result<Board, &Vec<ValidationError>> {
        if self.invalid_reasons.is_empty() && self.rows.is_empty() {
            self.invalid_reasons.push(ValidationError::Empty);
        }
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let shape = (self.rows.len(), self.rows[0].len());
        let flat = self.rows.iter().flatten().copied().collect_vec();
        let cells = Array2::from_shape_vec(shape, flat).expect("rows are checked rectangular as they are added");
        Ok(Board { cells })
    }
}

impl TryFrom<&[Vec<CellDescriptor>]> for Board {
    type Error = Vec<ValidationError>;

    fn try_from(rows: &[Vec<CellDescriptor>]) -> Result<Self, Self::Error> {
        BoardBuilder::from_descriptors(rows).build().map_err(Clone::clone)
    }
}
