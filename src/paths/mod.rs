pub mod align;
pub mod convert;
pub mod validate;

pub use align::{align, AlignedPrices};
pub use convert::{paths_from_prices, PriceHistory};
pub use validate::{validate_ensemble, ExpectedEnsemble};
