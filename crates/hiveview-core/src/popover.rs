//! Which card of a view has its detail popover open.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Popover {
    #[default]
    Closed,
    Open(usize),
}

impl Popover {
    /// Open card `index`, closing any other.
    pub fn open(self, index: usize) -> Self {
        Self::Open(index)
    }

    pub fn close(self) -> Self {
        Self::Closed
    }

    /// Clicking the open card closes it; clicking another card moves the popover.
    pub fn toggle(self, index: usize) -> Self {
        match self {
            Self::Open(current) if current == index => Self::Closed,
            _ => Self::Open(index),
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        *self == Self::Open(index)
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            Self::Open(index) => Some(*index),
            Self::Closed => None,
        }
    }
}

impl From<Option<usize>> for Popover {
    fn from(index: Option<usize>) -> Self {
        index.map_or(Self::Closed, Self::Open)
    }
}
