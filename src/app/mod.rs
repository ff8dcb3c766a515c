// Application layer: the two checkout-adjacent operations wrapping the core.

pub mod label;
pub mod quote;

pub use label::LabelService;
pub use quote::QuoteService;
