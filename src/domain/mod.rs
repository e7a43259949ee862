// Domain types and value objects
mod candle;
mod symbols;

// Re-export commonly used types to the world
pub use candle::{Candle, CandleType};
pub use symbols::{SYMBOL_PROMPT, parse_symbols, prompt_symbols};
