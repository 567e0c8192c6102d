//! 시세 수집을 위한 도메인 모델.

mod directory;
mod history_source;
mod intraday;
mod normalize;
mod option_chain;
mod price;

pub use directory::*;
pub use history_source::*;
pub use intraday::*;
pub use normalize::*;
pub use option_chain::*;
pub use price::*;
