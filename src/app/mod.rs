// Application modes invoked directly from main (C, R, S).

mod calculator;
mod replay;
mod simulate;

pub use calculator::CalculatorApp;
pub use replay::ReplayApp;
pub use simulate::SimulateApp;
