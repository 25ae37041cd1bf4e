use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum FieldError {
    #[error("field order {0} is not a prime")]
    NotPrime(u32),

    #[error("field order {0} is not a prime power")]
    NotPrimePower(u32),

    #[error("field order {order} exceeds the supported maximum of {max}")]
    OrderTooLarge { order: u32, max: u32 },

    #[error("modulus of degree {actual} given, but degree {expected} is required")]
    InvalidModulusDegree { expected: usize, actual: isize },

    #[error("modulus coefficient {coefficient} is not an element of GF({characteristic})")]
    InvalidModulusCoefficient { coefficient: u32, characteristic: u32 },

    #[error("modulus is reducible over GF({characteristic})")]
    ReducibleModulus { characteristic: u32 },

    #[error("value {value} is not an element of a field of order {order}")]
    ValueOutOfRange { value: u32, order: u32 },

    #[error("zero has no multiplicative inverse")]
    ZeroInverse,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum LinearSystemError {
    #[error("linear system has no equations or no variables")]
    EmptySystem,

    #[error("row {row} has {actual} coefficients, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("right-hand side has {actual} entries, but the matrix has {expected} rows")]
    RightHandSideLength { expected: usize, actual: usize },

    #[error("coefficients of the linear system belong to different fields")]
    FieldMismatch,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum InterpolationError {
    #[error("interpolation requires at least one root")]
    EmptyRoots,

    #[error("degree weight ({x}, {y}) must be positive in both variables")]
    InvalidDegreeWeight { x: u32, y: u32 },

    #[error("roots multiplicity must be at least 1")]
    ZeroMultiplicity,

    #[error("roots belong to different fields")]
    FieldMismatch,

    #[error("no non-trivial interpolation polynomial of weighted degree at most {max_weighted_degree}")]
    NoNonTrivialPolynomial { max_weighted_degree: u32 },

    #[error(transparent)]
    LinearSystem(#[from] LinearSystemError),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum FactorisationError {
    #[error("every polynomial is a y-root of the zero polynomial")]
    ZeroPolynomial,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum EncodingError {
    #[error("a code of length {n} needs {n} distinct evaluation points, but the field has only {available}")]
    TooManyPositions { n: usize, available: usize },
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum DecodingError {
    #[error("received word has {actual} positions, expected {expected}")]
    WordLength { expected: usize, actual: usize },

    #[error("information word length {k} is invalid for codeword length {n}")]
    InvalidInformationLength { n: usize, k: usize },

    #[error("minimum agreement {min_agreement} is invalid for codeword length {n}")]
    InvalidAgreement { n: usize, min_agreement: usize },

    #[error(
        "minimum agreement {min_agreement} is too low for n = {n}, k = {k}: \
        list decoding needs min_agreement² > n·(k - 1)"
    )]
    AgreementTooLow {
        n: usize,
        k: usize,
        min_agreement: usize,
    },

    #[error("no multiplicity up to {max_multiplicity} admits a suitable degree bound")]
    MultiplicityLimitExceeded { max_multiplicity: u32 },

    #[error("positions of the received word belong to different fields")]
    FieldMismatch,

    #[error("list decoding radius {radius} exceeds codeword length {n}")]
    RadiusTooLarge { n: usize, radius: usize },

    #[error("exhaustive search over {0} information words is too large")]
    SearchSpaceTooLarge(u128),

    #[error("unique decoding failed: found {0} candidates")]
    NotUnique(usize),

    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    #[error(transparent)]
    Factorisation(#[from] FactorisationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BatchError {
    #[error("failed to build the decoding thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
