//! Linear systems of equations over finite fields.

use itertools::Itertools;

use super::field_element::FieldElement;
use super::traits::Inverse;
use crate::error::LinearSystemError;

/// The solution space of a system `A·x = b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemSolution<'f> {
    /// The system has no solution.
    Inconsistent,

    /// Every solution is `particular + Σ λ_i · null_space_basis[i]`.
    Consistent {
        /// The solution with all free variables set to zero.
        particular: Vec<FieldElement<'f>>,

        /// One vector per free variable, in ascending order of the free
        /// variable's index. The basis vector of free variable `f` is one at
        /// `f`, zero at all other free variables, and zero at every index
        /// greater than `f`.
        null_space_basis: Vec<Vec<FieldElement<'f>>>,
    },
}

impl<'f> SystemSolution<'f> {
    pub fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent { .. })
    }

    /// Whether the system has exactly one solution.
    pub fn is_unique(&self) -> bool {
        match self {
            Self::Inconsistent => false,
            Self::Consistent {
                null_space_basis, ..
            } => null_space_basis.is_empty(),
        }
    }

    pub fn null_space_basis(&self) -> &[Vec<FieldElement<'f>>] {
        match self {
            Self::Inconsistent => &[],
            Self::Consistent {
                null_space_basis, ..
            } => null_space_basis,
        }
    }
}

pub trait LinearSystemSolver {
    /// Solve `matrix · x = rhs`. The matrix is given row by row.
    fn solve<'f>(
        &self,
        matrix: &[Vec<FieldElement<'f>>],
        rhs: &[FieldElement<'f>],
    ) -> Result<SystemSolution<'f>, LinearSystemError>;
}

/// Gauss-Jordan elimination to reduced row echelon form. The first non-zero
/// entry in a column serves as pivot.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct GaussianEliminationSolver;

impl GaussianEliminationSolver {
    fn validate<'f>(
        matrix: &[Vec<FieldElement<'f>>],
        rhs: &[FieldElement<'f>],
    ) -> Result<usize, LinearSystemError> {
        let Some(first_row) = matrix.first() else {
            return Err(LinearSystemError::EmptySystem);
        };
        let num_columns = first_row.len();
        if num_columns == 0 {
            return Err(LinearSystemError::EmptySystem);
        }
        if rhs.len() != matrix.len() {
            return Err(LinearSystemError::RightHandSideLength {
                expected: matrix.len(),
                actual: rhs.len(),
            });
        }
        if let Some((row, actual)) = matrix
            .iter()
            .map(Vec::len)
            .find_position(|&len| len != num_columns)
        {
            return Err(LinearSystemError::RaggedMatrix {
                row,
                expected: num_columns,
                actual,
            });
        }

        let field = first_row[0].field();
        let all_in_field = matrix
            .iter()
            .flatten()
            .chain(rhs)
            .all(|element| element.belongs_to(field));
        if !all_in_field {
            return Err(LinearSystemError::FieldMismatch);
        }

        Ok(num_columns)
    }
}

impl LinearSystemSolver for GaussianEliminationSolver {
    fn solve<'f>(
        &self,
        matrix: &[Vec<FieldElement<'f>>],
        rhs: &[FieldElement<'f>],
    ) -> Result<SystemSolution<'f>, LinearSystemError> {
        let num_columns = Self::validate(matrix, rhs)?;
        let field = matrix[0][0].field();

        // augmented matrix; the right-hand side is the last column
        let mut rows = matrix
            .iter()
            .zip(rhs)
            .map(|(row, &b)| row.iter().copied().chain([b]).collect_vec())
            .collect_vec();

        let mut pivot_columns = vec![];
        for column in 0..num_columns {
            let pivot_row = pivot_columns.len();
            let Some(found) = (pivot_row..rows.len()).find(|&r| !rows[r][column].is_zero()) else {
                continue;
            };
            rows.swap(pivot_row, found);

            let pivot_inverse = rows[pivot_row][column].inverse();
            for entry in &mut rows[pivot_row][column..] {
                *entry *= pivot_inverse;
            }

            let pivot = rows[pivot_row].clone();
            for (r, row) in rows.iter_mut().enumerate() {
                let factor = row[column];
                if r == pivot_row || factor.is_zero() {
                    continue;
                }
                for (entry, &p) in row[column..].iter_mut().zip(&pivot[column..]) {
                    *entry -= factor * p;
                }
            }

            pivot_columns.push(column);
            if pivot_columns.len() == rows.len() {
                break;
            }
        }

        let rank = pivot_columns.len();
        if rows[rank..].iter().any(|row| !row[num_columns].is_zero()) {
            return Ok(SystemSolution::Inconsistent);
        }

        let mut particular = vec![field.zero(); num_columns];
        for (row, &column) in rows.iter().zip(&pivot_columns) {
            particular[column] = row[num_columns];
        }

        let free_columns = (0..num_columns).filter(|c| !pivot_columns.contains(c));
        let null_space_basis = free_columns
            .map(|free| {
                let mut basis_vector = vec![field.zero(); num_columns];
                basis_vector[free] = field.one();
                for (row, &column) in rows.iter().zip(&pivot_columns) {
                    basis_vector[column] = -row[free];
                }
                basis_vector
            })
            .collect();

        Ok(SystemSolution::Consistent {
            particular,
            null_space_basis,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::math::galois_field::GaloisField;

    fn to_matrix<'f>(field: &'f GaloisField, values: &[Vec<u32>]) -> Vec<Vec<FieldElement<'f>>> {
        values
            .iter()
            .map(|row| row.iter().map(|&v| field.element(v)).collect())
            .collect()
    }

    fn to_vector<'f>(field: &'f GaloisField, values: &[u32]) -> Vec<FieldElement<'f>> {
        values.iter().map(|&v| field.element(v)).collect()
    }

    fn multiply<'f>(
        matrix: &[Vec<FieldElement<'f>>],
        vector: &[FieldElement<'f>],
    ) -> Vec<FieldElement<'f>> {
        matrix
            .iter()
            .map(|row| {
                let field = row[0].field();
                row.iter()
                    .zip(vector)
                    .fold(field.zero(), |acc, (&a, &x)| acc + a * x)
            })
            .collect()
    }

    #[test]
    fn unique_solution_in_gf7() {
        let field = GaloisField::prime(7).unwrap();
        let matrix = to_matrix(&field, &[vec![1, 2], vec![3, 4]]);
        let rhs = to_vector(&field, &[5, 6]);

        let solution = GaussianEliminationSolver.solve(&matrix, &rhs).unwrap();
        assert!(solution.is_unique());
        let SystemSolution::Consistent { particular, .. } = solution else {
            panic!("system must be consistent");
        };
        assert_eq!(rhs, multiply(&matrix, &particular));
    }

    #[test]
    fn inconsistent_system_is_detected() {
        let field = GaloisField::prime(5).unwrap();
        let matrix = to_matrix(&field, &[vec![1, 1], vec![2, 2]]);
        let rhs = to_vector(&field, &[1, 3]);

        let solution = GaussianEliminationSolver.solve(&matrix, &rhs).unwrap();
        assert_eq!(SystemSolution::Inconsistent, solution);
        assert!(!solution.is_consistent());
    }

    #[test]
    fn homogeneous_system_with_only_trivial_solution_is_not_an_error() {
        let field = GaloisField::prime(3).unwrap();
        let matrix = to_matrix(&field, &[vec![1, 0], vec![0, 1], vec![1, 1]]);
        let rhs = to_vector(&field, &[0, 0, 0]);

        let solution = GaussianEliminationSolver.solve(&matrix, &rhs).unwrap();
        assert!(solution.is_unique());
        assert!(solution.null_space_basis().is_empty());
    }

    #[test]
    fn null_space_basis_vectors_end_at_their_free_variable() {
        let field = GaloisField::prime(7).unwrap();

        // second row is twice the first, plus the pivot column 3
        let matrix = to_matrix(&field, &[vec![0, 1, 2, 0, 4], vec![0, 2, 4, 1, 1]]);
        let rhs = to_vector(&field, &[0, 0]);

        let solution = GaussianEliminationSolver.solve(&matrix, &rhs).unwrap();
        let basis = solution.null_space_basis();
        assert_eq!(3, basis.len());

        let free_variables = [0, 2, 4];
        for (vector, free) in basis.iter().zip(free_variables) {
            assert_eq!(field.one(), vector[free]);
            assert!(vector[free + 1..].iter().all(FieldElement::is_zero));
            assert!(multiply(&matrix, vector).iter().all(FieldElement::is_zero));
        }
    }

    #[test]
    fn empty_system_is_rejected() {
        assert_eq!(
            Err(LinearSystemError::EmptySystem),
            GaussianEliminationSolver.solve(&[], &[])
        );
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let field = GaloisField::prime(5).unwrap();
        let matrix = to_matrix(&field, &[vec![1, 1], vec![2]]);
        let rhs = to_vector(&field, &[0, 0]);
        let expected = LinearSystemError::RaggedMatrix {
            row: 1,
            expected: 2,
            actual: 1,
        };
        assert_eq!(Err(expected), GaussianEliminationSolver.solve(&matrix, &rhs));
    }

    #[test]
    fn mismatched_right_hand_side_is_rejected() {
        let field = GaloisField::prime(5).unwrap();
        let matrix = to_matrix(&field, &[vec![1, 1]]);
        let rhs = to_vector(&field, &[0, 0]);
        let expected = LinearSystemError::RightHandSideLength {
            expected: 1,
            actual: 2,
        };
        assert_eq!(Err(expected), GaussianEliminationSolver.solve(&matrix, &rhs));
    }

    #[test]
    fn elements_of_different_fields_are_rejected() {
        let gf5 = GaloisField::prime(5).unwrap();
        let gf7 = GaloisField::prime(7).unwrap();
        let matrix = vec![vec![gf5.one(), gf7.one()]];
        let rhs = vec![gf5.zero()];
        assert_eq!(
            Err(LinearSystemError::FieldMismatch),
            GaussianEliminationSolver.solve(&matrix, &rhs)
        );
    }

    #[proptest]
    fn every_reported_solution_solves_the_system(
        #[strategy(1_usize..6)] num_rows: usize,
        #[strategy(1_usize..6)] num_columns: usize,
        #[strategy(vec(vec(0_u32..7, #num_columns), #num_rows))] matrix: Vec<Vec<u32>>,
        #[strategy(vec(0_u32..7, #num_rows))] rhs: Vec<u32>,
        #[strategy(vec(0_u32..7, #num_columns))] lambdas: Vec<u32>,
    ) {
        let field = GaloisField::prime(7).unwrap();
        let matrix = to_matrix(&field, &matrix);
        let rhs = to_vector(&field, &rhs);

        let solution = GaussianEliminationSolver.solve(&matrix, &rhs).unwrap();
        let SystemSolution::Consistent {
            particular,
            null_space_basis,
        } = solution
        else {
            return Ok(());
        };

        prop_assert_eq!(num_columns, particular.len());
        prop_assert_eq!(num_rows, matrix.len());

        let mut combined = particular.clone();
        for (basis_vector, &lambda) in null_space_basis.iter().zip(&lambdas) {
            let lambda = field.element(lambda);
            for (entry, &b) in combined.iter_mut().zip(basis_vector) {
                *entry += lambda * b;
            }
        }

        prop_assert_eq!(&rhs, &multiply(&matrix, &particular));
        prop_assert_eq!(&rhs, &multiply(&matrix, &combined));
    }

    #[proptest]
    fn consistent_system_is_recognized_as_such(
        #[strategy(1_usize..6)] num_rows: usize,
        #[strategy(1_usize..6)] num_columns: usize,
        #[strategy(vec(vec(0_u32..5, #num_columns), #num_rows))] matrix: Vec<Vec<u32>>,
        #[strategy(vec(0_u32..5, #num_columns))] x: Vec<u32>,
    ) {
        let field = GaloisField::prime(5).unwrap();
        let matrix = to_matrix(&field, &matrix);
        let x = to_vector(&field, &x);
        let rhs = multiply(&matrix, &x);
        prop_assert_eq!(num_rows, rhs.len());
        prop_assert_eq!(num_columns, x.len());

        let solution = GaussianEliminationSolver.solve(&matrix, &rhs).unwrap();
        prop_assert!(solution.is_consistent());
    }
}
