use std::io;
use std::panic;

use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::NativeOptions;
use tokio::runtime::Runtime;

use stock_tracker::analysis::IndicatorEngine;
use stock_tracker::config::constants::demo;
use stock_tracker::data::{MemoryProvider, PriceSource, YahooProvider};
use stock_tracker::domain::{parse_symbols, prompt_symbols};
use stock_tracker::engine::{Interrupt, analyse_symbols, reporter};
use stock_tracker::{ChartController, Cli, TimeWindow, run_app};

/// First Ctrl-C stops the batch after the current symbol. A second one, or any
/// Ctrl-C once the batch is over, ends the process.
async fn watch_ctrl_c(interrupt: Interrupt) {
    loop {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Cannot listen for Ctrl-C: {}", e);
            return;
        }
        if interrupt.batch_finished() || !interrupt.request() {
            eprintln!("\nInterrupted");
            std::process::exit(130);
        }
        eprintln!("\nInterrupted by user, finishing the current symbol (Ctrl-C again to quit)");
    }
}

fn requested_symbols(args: &Cli) -> Result<Vec<String>> {
    if let Some(list) = &args.symbols {
        return Ok(parse_symbols(list));
    }
    if args.demo {
        return Ok(demo::SYMBOLS.iter().map(|s| s.to_string()).collect());
    }
    Ok(prompt_symbols(&mut io::stdin().lock(), &mut io::stdout())?)
}

fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("stock_tracker"), my_code_level)
        .init();

    let args = Cli::parse();
    let symbols = requested_symbols(&args)?;
    if symbols.is_empty() {
        println!("No valid symbols entered");
        return Ok(());
    }
    println!("Will analyze: {}", symbols.join(", "));
    println!("{}", "=".repeat(50));

    // Lives for the whole of main so the Ctrl-C watcher keeps running under the GUI
    let runtime = Runtime::new()?;
    let interrupt = Interrupt::new();
    runtime.spawn(watch_ctrl_c(interrupt.clone()));

    let source: Box<dyn PriceSource> = if args.demo {
        Box::new(MemoryProvider::demo(&symbols))
    } else {
        Box::new(YahooProvider::new()?)
    };

    let report = runtime.block_on(analyse_symbols(
        source.as_ref(),
        &IndicatorEngine::default(),
        &symbols,
        &interrupt,
    ));
    println!("{}", reporter::format_report(&report, TimeWindow::SixMonths));

    if args.no_gui {
        return Ok(());
    }
    if report.loaded.is_empty() {
        println!("Nothing to chart");
        return Ok(());
    }

    let controller = ChartController::new(report.loaded, args.window);
    let options = NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Stock Tracker"),
        ..Default::default()
    };

    eframe::run_native(
        "Stock Tracker",
        options,
        Box::new(move |cc| Ok(Box::new(run_app(cc, controller)))),
    )
    .map_err(|e| anyhow!("chart window failed: {}", e))
}
