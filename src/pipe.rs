use strum::{Display, EnumString, IntoStaticStr, VariantArray};

use crate::side::Side;

const TEE_STATES: &[[bool; 4]] = &[
    [false, true, true, true],
    [true, true, true, false],
    [true, true, false, true],
    [true, false, true, true],
];
const STRAIGHT_STATES: &[[bool; 4]] = &[
    [false, true, false, true],
    [true, false, true, false],
];
const CORNER_STATES: &[[bool; 4]] = &[
    [false, true, true, false],
    [true, true, false, false],
    [true, false, false, true],
    [false, false, true, true],
];
const ENDPOINT_STATES: &[[bool; 4]] = &[
    [true, false, false, false],
    [false, false, false, true],
    [false, false, true, false],
    [false, true, false, false],
];

/// The shape of a pipe piece, parsed from and printed as its single-letter tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, VariantArray, EnumString, Display, IntoStaticStr)]
pub enum PipeKind {
    /// Three-way junction.
    #[strum(serialize = "T")]
    Tee,
    /// Two-way pipe running straight through.
    #[strum(serialize = "I")]
    Straight,
    /// Two-way pipe bending through 90°.
    #[strum(serialize = "L")]
    Corner,
    /// One-way cap.
    #[strum(serialize = "E")]
    Endpoint,
}

impl PipeKind {
    /// The fixed openness table of this kind, indexed by rotation.
    ///
    /// Each entry lists whether the left, top, right, and bottom sides are open, in that order.
    #[inline]
    pub fn states(&self) -> &'static [[bool; 4]] {
        match self {
            Self::Tee => TEE_STATES,
            Self::Straight => STRAIGHT_STATES,
            Self::Corner => CORNER_STATES,
            Self::Endpoint => ENDPOINT_STATES,
        }
    }

    /// The number of distinct rotation states; four for every kind except [`Straight`](Self::Straight), which has two.
    #[inline]
    pub fn cycle_len(&self) -> u8 {
        self.states().len() as u8
    }
}

/// Which sides of a pipe are open in its current rotation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Openings(pub [bool; 4]);

impl Openings {
    /// Whether `side` is open.
    #[inline]
    pub fn is_open(&self, side: Side) -> bool {
        self.0[side.index()]
    }

    /// The box-drawing glyph for this combination of openings.
    pub fn glyph(&self) -> char {
        match self.0 {
            [false, false, false, false] => ' ',
            [true, false, false, false] => '╸',
            [false, true, false, false] => '╹',
            [false, false, true, false] => '╺',
            [false, false, false, true] => '╻',
            [true, true, false, false] => '┛',
            [true, false, true, false] => '━',
            [true, false, false, true] => '┓',
            [false, true, true, false] => '┗',
            [false, true, false, true] => '┃',
            [false, false, true, true] => '┏',
            [true, true, true, false] => '┻',
            [true, true, false, true] => '┫',
            [true, false, true, true] => '┳',
            [false, true, true, true] => '┣',
            [true, true, true, true] => '╋',
        }
    }
}

/// A single cell of a board: a piece kind, its rotation, and the per-cell flags the solvers keep.
///
/// `rotation` is always a valid index into the kind's table.
/// `locked` marks a finalized orientation; once set, nothing rotates the pipe again.
/// `visited` is scratch state for traversals and is cleared by whoever sets it before they return.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Pipe {
    pub(crate) kind: PipeKind,
    pub(crate) rotation: u8,
    pub(crate) locked: bool,
    pub(crate) visited: bool,
}

impl Pipe {
    /// Construct an unlocked pipe, or [`None`] if `rotation` is out of range for `kind`.
    pub fn new(kind: PipeKind, rotation: u8) -> Option<Self> {
        (rotation < kind.cycle_len()).then_some(Self {
            kind,
            rotation,
            locked: false,
            visited: false,
        })
    }

    /// The kind of this pipe.
    #[inline]
    pub fn kind(&self) -> PipeKind {
        self.kind
    }

    /// The current rotation index.
    #[inline]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Whether this pipe's orientation is finalized.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Advance one step along this kind's rotation cycle.
    ///
    /// Does not respect `locked`; that is the caller's job.
    #[inline]
    pub fn rotate_left(&mut self) {
        self.rotation = (self.rotation + 1) % self.kind.cycle_len();
    }

    /// Step backwards along the rotation cycle. On a [`Straight`](PipeKind::Straight) pipe this is the same as [`Self::rotate_left`].
    #[inline]
    pub fn rotate_right(&mut self) {
        let len = self.kind.cycle_len();
        self.rotation = (self.rotation + len - 1) % len;
    }

    /// The sides open in the current rotation.
    #[inline]
    pub fn open_sides(&self) -> Openings {
        Openings(self.kind.states()[self.rotation as usize])
    }

    #[inline]
    pub(crate) fn is_open(&self, side: Side) -> bool {
        self.open_sides().is_open(side)
    }
}
