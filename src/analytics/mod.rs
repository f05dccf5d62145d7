pub mod rewards;
pub mod volatility;

pub use rewards::softmax_weights;
pub use volatility::annualized_volatility;
