/// A strict total order over `T`, expressed through a single "less than"
/// primitive. Everything else the skip list needs is derived from it, so an
/// element type never has to provide `<=` or `==` on its own.
pub trait Comparator<T> {
    fn less(&self, a: &T, b: &T) -> bool;

    #[inline]
    fn less_or_equal(&self, a: &T, b: &T) -> bool {
        !self.less(b, a)
    }

    /// Two values are equal iff neither precedes the other.
    #[inline]
    fn equal(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Orders values with their own `<` operator.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<T: PartialOrd> Comparator<T> for NaturalOrder {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
