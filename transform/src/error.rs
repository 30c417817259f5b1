use snafu::Snafu;

pub type Result<T, E = TransformError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum TransformError {
    #[snafu(display("compute pattern needs at least one index map"))]
    EmptyPattern,

    #[snafu(display("index map {operand} has {num_dims} dimensions but the pattern has {num_iterators} iterator kinds"))]
    DimensionCountMismatch { operand: usize, num_dims: usize, num_iterators: usize },

    #[snafu(display("index map {operand} has {num_symbols} symbols, expected {expected}"))]
    SymbolCountMismatch { operand: usize, num_symbols: usize, expected: usize },

    #[snafu(display("invalid index map for operand {operand}: {source}"))]
    InvalidIndexMap { operand: usize, source: restruct_affine::Error },
}
