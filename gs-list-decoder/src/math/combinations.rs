//! Binomial coefficients as elements of a finite field.

use super::field_element::FieldElement;
use super::galois_field::GaloisField;

/// A square table of binomial coefficients `C(n, k)`, filled lazily.
///
/// An entry is `None` until it has been computed. The cache belongs to one
/// build or factorisation and is never shared between concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct CombinationsCache<'f> {
    rows: Vec<Vec<Option<FieldElement<'f>>>>,
}

impl<'f> CombinationsCache<'f> {
    /// A cache holding rows and columns `0..size`.
    pub fn new(size: usize) -> Self {
        Self {
            rows: vec![vec![None; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, n: usize, k: usize) -> Option<FieldElement<'f>> {
        self.rows.get(n)?.get(k).copied().flatten()
    }

    fn set(&mut self, n: usize, k: usize, value: FieldElement<'f>) {
        self.rows[n][k] = Some(value);
    }

    /// Grow the table, keeping it square, until it holds row `n`.
    fn ensure_row(&mut self, n: usize) {
        if n < self.size() {
            return;
        }

        let new_size = (n + 1).max(2 * self.size());
        for row in &mut self.rows {
            row.resize(new_size, None);
        }
        self.rows.resize(new_size, vec![None; new_size]);
    }
}

pub trait CombinationsCountCalculator {
    /// The binomial coefficient `C(n, k)` reduced modulo the characteristic
    /// of `field`. Zero if `k < 0`, `k > n`, or `n < 0`.
    fn calculate<'f>(
        &self,
        field: &'f GaloisField,
        n: i64,
        k: i64,
        cache: &mut CombinationsCache<'f>,
    ) -> FieldElement<'f>;
}

/// Computes binomial coefficients with Pascal's rule,
/// `C(n, k) = C(n-1, k-1) + C(n-1, k)`, memoizing every entry it touches.
///
/// Summation happens in the field, so the result is automatically reduced
/// modulo the field's characteristic.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct PascalsTriangleCalculator;

impl CombinationsCountCalculator for PascalsTriangleCalculator {
    fn calculate<'f>(
        &self,
        field: &'f GaloisField,
        n: i64,
        k: i64,
        cache: &mut CombinationsCache<'f>,
    ) -> FieldElement<'f> {
        if n < 0 || k < 0 || k > n {
            return field.zero();
        }

        let (n, k) = (n as usize, k as usize);
        cache.ensure_row(n);
        if let Some(cached) = cache.get(n, k) {
            return cached;
        }

        // Only the entries in columns `0..=k` of rows `0..=n` are needed.
        for row in 0..=n {
            for column in 0..=row.min(k) {
                if cache.get(row, column).is_some() {
                    continue;
                }

                let value = if column == 0 || column == row {
                    field.one()
                } else {
                    let left = cache.get(row - 1, column - 1);
                    let right = cache.get(row - 1, column);
                    match (left, right) {
                        (Some(left), Some(right)) => left + right,
                        _ => unreachable!("the previous row is complete up to column {k}"),
                    }
                };
                cache.set(row, column, value);
            }
        }

        cache
            .get(n, k)
            .unwrap_or_else(|| unreachable!("C({n}, {k}) has just been computed"))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    fn exact_binomial(n: u64, k: u64) -> u128 {
        (0..k).fold(1_u128, |acc, i| acc * u128::from(n - i) / u128::from(i + 1))
    }

    #[test]
    fn small_binomials_in_gf11() {
        let field = GaloisField::prime(11).unwrap();
        let mut cache = CombinationsCache::new(4);
        let calculator = PascalsTriangleCalculator;

        assert_eq!(field.one(), calculator.calculate(&field, 0, 0, &mut cache));
        assert_eq!(field.element(6), calculator.calculate(&field, 4, 2, &mut cache));
        assert_eq!(field.element(10), calculator.calculate(&field, 5, 2, &mut cache));

        // C(6, 3) = 20 = 9 mod 11
        assert_eq!(field.element(9), calculator.calculate(&field, 6, 3, &mut cache));
    }

    #[test]
    fn binomials_in_characteristic_two_are_reduced() {
        let field = GaloisField::prime_power(8, &[1, 1, 0, 1]).unwrap();
        let mut cache = CombinationsCache::new(8);
        let calculator = PascalsTriangleCalculator;

        // C(4, 2) = 6 is even, C(5, 1) = 5 is odd
        assert_eq!(field.zero(), calculator.calculate(&field, 4, 2, &mut cache));
        assert_eq!(field.one(), calculator.calculate(&field, 5, 1, &mut cache));
    }

    #[test]
    fn out_of_range_arguments_give_zero() {
        let field = GaloisField::prime(7).unwrap();
        let mut cache = CombinationsCache::new(2);
        let calculator = PascalsTriangleCalculator;

        assert_eq!(field.zero(), calculator.calculate(&field, 3, -1, &mut cache));
        assert_eq!(field.zero(), calculator.calculate(&field, 3, 4, &mut cache));
        assert_eq!(field.zero(), calculator.calculate(&field, -2, 0, &mut cache));
        assert_eq!(2, cache.size());
    }

    #[test]
    fn cache_grows_on_demand_and_stays_square() {
        let field = GaloisField::prime(5).unwrap();
        let mut cache = CombinationsCache::new(1);
        let _ = PascalsTriangleCalculator.calculate(&field, 9, 4, &mut cache);

        assert!(cache.size() >= 10);
        assert!(cache.rows.iter().all(|row| row.len() == cache.size()));
        assert_eq!(Some(field.element(1)), cache.get(9, 4)); // 126 = 1 mod 5
    }

    #[test]
    fn empty_cache_is_usable() {
        let field = GaloisField::prime(3).unwrap();
        let mut cache = CombinationsCache::default();
        assert_eq!(field.zero(), PascalsTriangleCalculator.calculate(&field, 3, 1, &mut cache));
    }

    #[proptest]
    fn calculated_binomials_match_exact_binomials(
        #[strategy(0_i64..60)] n: i64,
        #[strategy(0_i64..=#n)] k: i64,
        #[strategy(prop::sample::select(vec![2_u32, 3, 5, 7, 13]))] prime: u32,
    ) {
        let field = GaloisField::prime(prime).unwrap();
        let mut cache = CombinationsCache::new(8);
        let calculated = PascalsTriangleCalculator.calculate(&field, n, k, &mut cache);

        let expected = exact_binomial(n as u64, k as u64) % u128::from(prime);
        prop_assert_eq!(expected, u128::from(calculated.value()));
    }

    #[proptest(cases = 20)]
    fn cache_reuse_does_not_change_results(
        #[strategy(prop::collection::vec((0_i64..30, 0_i64..30), 1..20))] queries: Vec<(i64, i64)>,
    ) {
        let field = GaloisField::prime(7).unwrap();
        let calculator = PascalsTriangleCalculator;
        let mut shared_cache = CombinationsCache::new(4);

        for (n, k) in queries {
            let mut fresh_cache = CombinationsCache::new(0);
            let shared = calculator.calculate(&field, n, k, &mut shared_cache);
            let fresh = calculator.calculate(&field, n, k, &mut fresh_cache);
            prop_assert_eq!(fresh, shared);
        }
    }
}
