#![warn(rust_2018_idioms)]
#![allow(clippy::collapsible_else_if)]

mod app;
mod model;
mod scoring;
mod util;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "C" => {
            // Calculator (hand scoring mode)
            app::CalculatorApp::new(args2).run();
        }
        "R" => {
            // Replay (game record mode)
            app::ReplayApp::new(args2).run();
        }
        "S" => {
            // Simulate (random game mode)
            app::SimulateApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
