//! Double-buffer role tracking for feedback simulations.

/// Which buffer is read this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadSide {
    A,
    B,
}

impl ReadSide {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            ReadSide::A => ReadSide::B,
            ReadSide::B => ReadSide::A,
        }
    }
}

/// Two owned buffers whose read/write roles flip once per frame.
///
/// `read` and `write` always name different buffers, so a pass built from
/// [`PingPong::pair`] can never sample the target it renders into.
#[derive(Debug)]
pub struct PingPong<T> {
    a: T,
    b: T,
    read: ReadSide,
}

impl<T> PingPong<T> {
    pub fn new(a: T, b: T) -> Self {
        Self {
            a,
            b,
            read: ReadSide::A,
        }
    }

    #[inline]
    pub fn read_side(&self) -> ReadSide {
        self.read
    }

    pub fn read(&self) -> &T {
        match self.read {
            ReadSide::A => &self.a,
            ReadSide::B => &self.b,
        }
    }

    pub fn write(&self) -> &T {
        match self.read {
            ReadSide::A => &self.b,
            ReadSide::B => &self.a,
        }
    }

    /// `(read, write)` for this frame.
    pub fn pair(&self) -> (&T, &T) {
        (self.read(), self.write())
    }

    /// Hand the freshly written buffer to the next frame as its input.
    pub fn swap(&mut self) {
        self.read = self.read.flipped();
    }

    pub fn both(&self) -> [&T; 2] {
        [&self.a, &self.b]
    }

    pub fn both_mut(&mut self) -> [&mut T; 2] {
        [&mut self.a, &mut self.b]
    }
}
