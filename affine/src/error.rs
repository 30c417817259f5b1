use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// A result references a dimension outside the map's domain.
    #[snafu(display("dimension d{position} is out of range for a domain of {num_dims} dimensions"))]
    DimOutOfRange { position: usize, num_dims: usize },

    /// A result references a symbol outside the map's domain.
    #[snafu(display("symbol s{position} is out of range for a domain of {num_symbols} symbols"))]
    SymbolOutOfRange { position: usize, num_symbols: usize },

    /// Result position outside the map's result list.
    #[snafu(display("result position {position} is out of range for a map with {num_results} results"))]
    ResultOutOfRange { position: usize, num_results: usize },
}
