mod demo;
mod provider;
mod yahoo;

pub use {
    provider::{MemoryProvider, PriceSource},
    yahoo::YahooProvider,
};
