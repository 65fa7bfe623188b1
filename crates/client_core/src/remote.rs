/// A value fetched from the store that may not have arrived yet.
///
/// Never terminal: any `Got` can be replaced by a later snapshot, so derived
/// views re-evaluate on every request rather than latching. Composition is
/// all-or-nothing — a single `Loading` input keeps the whole derived value
/// `Loading`, with no partial-display special case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remote<T> {
    Loading,
    Got(T),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Remote::Loading
    }
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn got(&self) -> Option<&T> {
        match self {
            Remote::Loading => None,
            Remote::Got(value) => Some(value),
        }
    }

    pub fn as_ref(&self) -> Remote<&T> {
        match self {
            Remote::Loading => Remote::Loading,
            Remote::Got(value) => Remote::Got(value),
        }
    }

    pub fn map<U, F>(self, f: F) -> Remote<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Remote::Loading => Remote::Loading,
            Remote::Got(value) => Remote::Got(f(value)),
        }
    }

    /// All-or-nothing pairing: one `Loading` operand makes the pair
    /// `Loading`, regardless of the other operand.
    pub fn zip<U>(self, other: Remote<U>) -> Remote<(T, U)> {
        match (self, other) {
            (Remote::Got(a), Remote::Got(b)) => Remote::Got((a, b)),
            _ => Remote::Loading,
        }
    }
}

pub fn map2<A, B, Out, F>(a: Remote<A>, b: Remote<B>, f: F) -> Remote<Out>
where
    F: FnOnce(A, B) -> Out,
{
    a.zip(b).map(|(a, b)| f(a, b))
}

pub fn map3<A, B, C, Out, F>(a: Remote<A>, b: Remote<B>, c: Remote<C>, f: F) -> Remote<Out>
where
    F: FnOnce(A, B, C) -> Out,
{
    a.zip(b).zip(c).map(|((a, b), c)| f(a, b, c))
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
