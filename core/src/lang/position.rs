/// Byte offset into the source text.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, derive_more::Deref, derive_more::From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BytePos(pub usize);

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: BytePos,
    pub end: BytePos,
}

impl Span {
    pub fn new(start: impl Into<BytePos>, end: impl Into<BytePos>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Span covering the single byte at `pos`.
    pub fn at(pos: impl Into<BytePos>) -> Self {
        let BytePos(start) = pos.into();
        Self::new(start, start + 1)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start.0, self.end.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithSpan<T> {
    pub value: T,
    pub span: Span,
}

impl<T> WithSpan<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for WithSpan<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.value, self.span)
    }
}
