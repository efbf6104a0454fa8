//! Algebraic groups used to weight graph edges.
//!
//! A [`Group`] supplies the identity element, the composition law and its
//! inverse, and an explicit equality predicate over its elements. The group
//! laws (associativity, two-sided identity, two-sided inverses) are assumed and
//! never checked; supplying functions that break them makes every derived
//! result meaningless but never unsafe.
//!
//! # Equality
//!
//! Elements are compared through [`Group::elements_equal`] rather than
//! `PartialEq`, because several representations may denote the same element.
//! The predicate must be an equivalence relation. Floating-point groups in this
//! module use exact IEEE comparison with NaN equal to NaN, which keeps the
//! relation reflexive.
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Group trait
// ---------------------------------------------------------------------------

/// A group `(E, compose)` with identity and inverses.
///
/// Implementors provide `compose` and `compose_inverse`, where
/// `compose_inverse(a, b)` is `a ∘ b⁻¹`. The inverse of a single element is
/// derived from it as `compose_inverse(identity, b)`.
pub trait Group {
    /// The type of group elements (edge weights).
    type Element: Clone + fmt::Debug;

    /// Human-readable name of the group.
    fn name(&self) -> &str;

    /// The neutral element.
    fn identity(&self) -> Self::Element;

    /// Composes `a` then `b`.
    fn compose(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Composes `a` with the inverse of `b`.
    fn compose_inverse(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Returns `true` if `a` and `b` denote the same element.
    fn elements_equal(&self, a: &Self::Element, b: &Self::Element) -> bool;

    /// Returns the inverse of `element`.
    fn invert(&self, element: &Self::Element) -> Self::Element {
        self.compose_inverse(&self.identity(), element)
    }

    /// Left-folds `compose` over `elements`, starting from the identity.
    ///
    /// The fold is order-sensitive: `fold([a, b, c])` is `((e ∘ a) ∘ b) ∘ c`.
    fn fold<'a, I>(&self, elements: I) -> Self::Element
    where
        I: IntoIterator<Item = &'a Self::Element>,
        Self::Element: 'a,
    {
        elements
            .into_iter()
            .fold(self.identity(), |acc, element| self.compose(&acc, element))
    }

    /// Returns `true` if `element` is a member of the group's carrier set.
    ///
    /// Defaults to accepting everything. Groups whose element type is wider
    /// than the carrier (fixed-length vectors, permutations) override this so
    /// that untrusted weights can be rejected at load time.
    fn contains(&self, _element: &Self::Element) -> bool {
        true
    }
}

/// Exact float equality that treats NaN as equal to itself.
fn same_float(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn same_floats(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_float(*x, *y))
}

// ---------------------------------------------------------------------------
// Real numbers
// ---------------------------------------------------------------------------

/// Non-zero real numbers under multiplication.
///
/// This is the conventional weighting for exchange-rate style graphs, where
/// walking an edge backwards divides by its rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealMultiplicative;

impl Group for RealMultiplicative {
    type Element = f64;

    fn name(&self) -> &str {
        "real numbers under multiplication"
    }

    fn identity(&self) -> f64 {
        1.0
    }

    fn compose(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }

    fn compose_inverse(&self, a: &f64, b: &f64) -> f64 {
        a / b
    }

    fn elements_equal(&self, a: &f64, b: &f64) -> bool {
        same_float(*a, *b)
    }

    fn contains(&self, element: &f64) -> bool {
        *element != 0.0
    }
}

/// Real numbers under addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealAdditive;

impl Group for RealAdditive {
    type Element = f64;

    fn name(&self) -> &str {
        "real numbers under addition"
    }

    fn identity(&self) -> f64 {
        0.0
    }

    fn compose(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn compose_inverse(&self, a: &f64, b: &f64) -> f64 {
        a - b
    }

    fn elements_equal(&self, a: &f64, b: &f64) -> bool {
        same_float(*a, *b)
    }
}

/// 64-bit integers under wrapping addition (the cyclic group of order 2⁶⁴).
///
/// Arithmetic is exact, so cycle weights compare reliably against the
/// identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerAdditive;

impl Group for IntegerAdditive {
    type Element = i64;

    fn name(&self) -> &str {
        "integers under addition"
    }

    fn identity(&self) -> i64 {
        0
    }

    fn compose(&self, a: &i64, b: &i64) -> i64 {
        a.wrapping_add(*b)
    }

    fn compose_inverse(&self, a: &i64, b: &i64) -> i64 {
        a.wrapping_sub(*b)
    }

    fn elements_equal(&self, a: &i64, b: &i64) -> bool {
        a == b
    }
}

// ---------------------------------------------------------------------------
// Real vectors
// ---------------------------------------------------------------------------

/// Real vectors of a fixed dimension under componentwise addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorAdditive {
    dimension: usize,
}

impl VectorAdditive {
    /// Creates the additive group of `dimension`-component vectors.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Number of components of every element.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Group for VectorAdditive {
    type Element = Vec<f64>;

    fn name(&self) -> &str {
        "real vectors under addition"
    }

    fn identity(&self) -> Vec<f64> {
        vec![0.0; self.dimension]
    }

    fn compose(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> {
        a.iter().zip(b).map(|(x, y)| x + y).collect()
    }

    fn compose_inverse(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> {
        a.iter().zip(b).map(|(x, y)| x - y).collect()
    }

    fn elements_equal(&self, a: &Vec<f64>, b: &Vec<f64>) -> bool {
        same_floats(a, b)
    }

    fn contains(&self, element: &Vec<f64>) -> bool {
        element.len() == self.dimension
    }
}

/// Real vectors of a fixed dimension with non-zero components under
/// componentwise multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorMultiplicative {
    dimension: usize,
}

impl VectorMultiplicative {
    /// Creates the multiplicative group of `dimension`-component vectors.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Number of components of every element.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Group for VectorMultiplicative {
    type Element = Vec<f64>;

    fn name(&self) -> &str {
        "real vectors under multiplication"
    }

    fn identity(&self) -> Vec<f64> {
        vec![1.0; self.dimension]
    }

    fn compose(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> {
        a.iter().zip(b).map(|(x, y)| x * y).collect()
    }

    fn compose_inverse(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> {
        a.iter().zip(b).map(|(x, y)| x / y).collect()
    }

    fn elements_equal(&self, a: &Vec<f64>, b: &Vec<f64>) -> bool {
        same_floats(a, b)
    }

    fn contains(&self, element: &Vec<f64>) -> bool {
        element.len() == self.dimension && element.iter().all(|x| *x != 0.0)
    }
}

// ---------------------------------------------------------------------------
// Permutations
// ---------------------------------------------------------------------------

/// The symmetric group on `0..degree`.
///
/// An element `p` maps `i` to `p[i]`. Composition follows traversal order:
/// `compose(a, b)` applies `a` first, then `b`, so `compose(a, b)[i] = b[a[i]]`.
/// This group is not commutative for `degree >= 3`, which makes it useful for
/// checking that cycle direction is respected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permutations {
    degree: usize,
}

impl Permutations {
    /// Creates the symmetric group of the given degree.
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Number of points permuted.
    pub fn degree(&self) -> usize {
        self.degree
    }

    fn inverse_of(p: &[usize]) -> Vec<usize> {
        let mut inverse: Vec<usize> = (0..p.len()).collect();
        for (i, &image) in p.iter().enumerate() {
            if let Some(slot) = inverse.get_mut(image) {
                *slot = i;
            }
        }
        inverse
    }
}

impl Group for Permutations {
    type Element = Vec<usize>;

    fn name(&self) -> &str {
        "permutations"
    }

    fn identity(&self) -> Vec<usize> {
        (0..self.degree).collect()
    }

    fn compose(&self, a: &Vec<usize>, b: &Vec<usize>) -> Vec<usize> {
        a.iter().map(|&i| b.get(i).copied().unwrap_or(i)).collect()
    }

    fn compose_inverse(&self, a: &Vec<usize>, b: &Vec<usize>) -> Vec<usize> {
        self.compose(a, &Self::inverse_of(b))
    }

    fn elements_equal(&self, a: &Vec<usize>, b: &Vec<usize>) -> bool {
        a == b
    }

    fn contains(&self, element: &Vec<usize>) -> bool {
        if element.len() != self.degree {
            return false;
        }
        let mut seen = vec![false; self.degree];
        for &image in element {
            match seen.get_mut(image) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// FnGroup
// ---------------------------------------------------------------------------

type BinaryOp<E> = Arc<dyn Fn(&E, &E) -> E + Send + Sync>;
type EqualityFn<E> = Arc<dyn Fn(&E, &E) -> bool + Send + Sync>;

/// A group assembled at runtime from closures.
///
/// The equality predicate is supplied explicitly and is never derived from a
/// hash of the element.
pub struct FnGroup<E> {
    name: String,
    identity: E,
    compose: BinaryOp<E>,
    compose_inverse: BinaryOp<E>,
    equal: EqualityFn<E>,
}

impl<E> FnGroup<E> {
    /// Creates a group from its identity and operations.
    ///
    /// `compose_inverse(a, b)` must compute `a ∘ b⁻¹`.
    pub fn new<C, I, Q>(
        name: impl Into<String>,
        identity: E,
        compose: C,
        compose_inverse: I,
        equal: Q,
    ) -> Self
    where
        C: Fn(&E, &E) -> E + Send + Sync + 'static,
        I: Fn(&E, &E) -> E + Send + Sync + 'static,
        Q: Fn(&E, &E) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            identity,
            compose: Arc::new(compose),
            compose_inverse: Arc::new(compose_inverse),
            equal: Arc::new(equal),
        }
    }
}

impl<E: Clone> Clone for FnGroup<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            identity: self.identity.clone(),
            compose: Arc::clone(&self.compose),
            compose_inverse: Arc::clone(&self.compose_inverse),
            equal: Arc::clone(&self.equal),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for FnGroup<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGroup")
            .field("name", &self.name)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<E: Clone + fmt::Debug> Group for FnGroup<E> {
    type Element = E;

    fn name(&self) -> &str {
        &self.name
    }

    fn identity(&self) -> E {
        self.identity.clone()
    }

    fn compose(&self, a: &E, b: &E) -> E {
        (self.compose)(a, b)
    }

    fn compose_inverse(&self, a: &E, b: &E) -> E {
        (self.compose_inverse)(a, b)
    }

    fn elements_equal(&self, a: &E, b: &E) -> bool {
        (self.equal)(a, b)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_multiplicative_inverse_is_reciprocal() {
        let g = RealMultiplicative;
        assert!(g.elements_equal(&g.invert(&4.0), &0.25));
        assert!(g.elements_equal(&g.compose(&4.0, &g.invert(&4.0)), &g.identity()));
    }

    #[test]
    fn real_additive_inverse_is_negation() {
        let g = RealAdditive;
        assert!(g.elements_equal(&g.invert(&3.5), &-3.5));
        assert!(g.elements_equal(&g.compose(&3.5, &-3.5), &0.0));
    }

    #[test]
    fn nan_equals_itself() {
        let g = RealAdditive;
        assert!(g.elements_equal(&f64::NAN, &f64::NAN));
        assert!(!g.elements_equal(&f64::NAN, &0.0));
    }

    #[test]
    fn zero_is_not_a_multiplicative_element() {
        assert!(!RealMultiplicative.contains(&0.0));
        assert!(RealMultiplicative.contains(&-2.0));
    }

    #[test]
    fn integer_addition_wraps() {
        let g = IntegerAdditive;
        assert_eq!(g.compose(&i64::MAX, &1), i64::MIN);
        assert_eq!(g.invert(&i64::MIN), i64::MIN);
    }

    #[test]
    fn fold_starts_from_identity_and_keeps_order() {
        let g = RealAdditive;
        let weights = [1.0, 2.0, 3.5];
        assert!(g.elements_equal(&g.fold(&weights), &6.5));
        assert!(g.elements_equal(&g.fold(&[]), &0.0));
    }

    #[test]
    fn vector_groups_work_componentwise() {
        let add = VectorAdditive::new(2);
        assert_eq!(add.compose(&vec![1.0, 2.0], &vec![3.0, 4.0]), vec![4.0, 6.0]);
        assert_eq!(add.invert(&vec![1.0, -1.0]), vec![-1.0, 1.0]);

        let mul = VectorMultiplicative::new(2);
        assert_eq!(mul.compose(&vec![1.0, 2.0], &vec![3.0, 4.0]), vec![3.0, 8.0]);
        assert_eq!(mul.invert(&vec![2.0, 4.0]), vec![0.5, 0.25]);
    }

    #[test]
    fn vector_membership_checks_dimension() {
        assert!(VectorAdditive::new(3).contains(&vec![0.0, 1.0, 2.0]));
        assert!(!VectorAdditive::new(3).contains(&vec![0.0, 1.0]));
        assert!(!VectorMultiplicative::new(2).contains(&vec![0.0, 1.0]));
    }

    #[test]
    fn vector_equality_compares_values_not_representation() {
        let g = VectorAdditive::new(2);
        assert!(g.elements_equal(&vec![1.0, 2.0], &vec![1.0, 2.0]));
        assert!(g.elements_equal(&vec![0.0, 0.0], &vec![-0.0, 0.0]));
        assert!(!g.elements_equal(&vec![1.0, 2.0], &vec![1.0]));
    }

    #[test]
    fn permutations_compose_in_traversal_order() {
        let g = Permutations::new(3);
        let swap01 = vec![1, 0, 2];
        let swap12 = vec![0, 2, 1];
        // 0 -> 1 (swap01) -> 2 (swap12)
        assert_eq!(g.compose(&swap01, &swap12), vec![2, 0, 1]);
        assert_eq!(g.compose(&swap12, &swap01), vec![1, 2, 0]);
    }

    #[test]
    fn permutation_inverse_round_trips() {
        let g = Permutations::new(4);
        let p = vec![2, 0, 3, 1];
        assert_eq!(g.compose(&p, &g.invert(&p)), g.identity());
        assert_eq!(g.compose(&g.invert(&p), &p), g.identity());
    }

    #[test]
    fn permutation_membership_rejects_repeats() {
        let g = Permutations::new(3);
        assert!(g.contains(&vec![2, 1, 0]));
        assert!(!g.contains(&vec![0, 0, 1]));
        assert!(!g.contains(&vec![0, 1, 3]));
        assert!(!g.contains(&vec![0, 1]));
    }

    #[test]
    fn fn_group_uses_supplied_operations() {
        let g = FnGroup::new(
            "integers mod 5",
            0_u8,
            |a: &u8, b: &u8| (a + b) % 5,
            |a: &u8, b: &u8| (a + 5 - b) % 5,
            |a: &u8, b: &u8| a == b,
        );
        assert_eq!(g.name(), "integers mod 5");
        assert_eq!(g.compose(&3, &4), 2);
        assert_eq!(g.invert(&2), 3);
        assert!(g.elements_equal(&g.fold(&[1, 2, 2]), &0));
    }
}
