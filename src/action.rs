//! Group actions.
//!
//! Permutations act on points (evaluation) and on other permutations (composition). The traits in
//! this module give both a common shape so that callers can reuse scratch space when acting
//! repeatedly.
use crate::El;

/// Left action on `T`.
///
/// A permutation acts on a point on the left by mapping it to its image.
pub trait LeftAction<T>
where
    T: ?Sized,
{
    /// Type of scratch space needed to perform the action.
    type Scratch: Default;

    /// Act on a value on the left.
    fn left_apply(&self, mut value: T) -> T
    where
        T: Sized,
    {
        self.left_apply_to(&mut value);
        value
    }

    /// Act on a value, in place, on the left.
    fn left_apply_to(&self, value: &mut T) {
        self.left_apply_to_with_scratch(value, &mut Self::Scratch::default())
    }

    /// Act on a value, in place, on the left. Use existing scratch space.
    fn left_apply_to_with_scratch(&self, value: &mut T, scratch: &mut Self::Scratch);
}

/// Right action on `T`.
///
/// For permutations `p` and `q`, `p.right_apply(q)` is the permutation that first applies `q` and
/// then `p`. This is the cheap direction: it needs no scratch space.
pub trait RightAction<T>
where
    T: ?Sized,
{
    /// Type of scratch space needed to perform the action.
    type Scratch: Default;

    /// Act on a value on the right.
    fn right_apply(&self, mut value: T) -> T
    where
        T: Sized,
    {
        self.right_apply_to(&mut value);
        value
    }

    /// Act on a value, in place, on the right.
    fn right_apply_to(&self, value: &mut T) {
        self.right_apply_to_with_scratch(value, &mut Self::Scratch::default())
    }

    /// Act on a value, in place, on the right. Use existing scratch space.
    fn right_apply_to_with_scratch(&self, value: &mut T, scratch: &mut Self::Scratch);
}

/// Pointwise queries for anything acting on points.
///
/// Implemented for every type with a scratch-free left action on [`El`].
pub trait PointAction {
    /// Image of a single point.
    fn image(&self, el: El) -> El;

    /// Whether a point is mapped to itself.
    fn fixes(&self, el: El) -> bool {
        self.image(el) == el
    }

    /// Whether every point of a sequence is mapped to itself.
    ///
    /// Used to select the strong generators belonging to a level of a stabilizer chain.
    fn fixes_all<'a, I>(&self, points: I) -> bool
    where
        I: IntoIterator<Item = &'a El>,
    {
        points.into_iter().all(|&el| self.fixes(el))
    }
}

impl<A> PointAction for A
where
    A: LeftAction<El, Scratch = ()>,
{
    fn image(&self, el: El) -> El {
        self.left_apply(el)
    }
}
