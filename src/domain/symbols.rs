use std::io::{self, BufRead, Write};

use itertools::Itertools;

pub const SYMBOL_PROMPT: &str =
    "Enter US stock symbols separated by comma (e.g., AAPL,MSFT,TSLA): ";

/// Splits a comma separated line of tickers into trimmed, upper-cased symbols.
/// Empty entries are dropped and repeats keep their first position only,
/// since every per-symbol view is keyed by the symbol itself.
pub fn parse_symbols(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .unique()
        .collect()
}

/// Asks for symbols on `output` and reads one line from `input`.
pub fn prompt_symbols(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<Vec<String>> {
    write!(output, "{}", SYMBOL_PROMPT)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(parse_symbols(&line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn trims_and_upper_cases() {
        assert_eq!(parse_symbols(" aapl, msft ,Tsla"), vec!["AAPL", "MSFT", "TSLA"]);
    }

    #[test]
    fn drops_empty_and_repeated_entries() {
        assert_eq!(parse_symbols("aapl,, ,AAPL,nvda,"), vec!["AAPL", "NVDA"]);
        assert!(parse_symbols("  ").is_empty());
    }

    #[test]
    fn prompt_reads_one_line() {
        let mut input = Cursor::new("googl, amzn\nignored\n");
        let mut output = Vec::new();
        let symbols = prompt_symbols(&mut input, &mut output).unwrap();
        assert_eq!(symbols, vec!["GOOGL", "AMZN"]);
        assert_eq!(String::from_utf8(output).unwrap(), SYMBOL_PROMPT);
    }
}
