// mainから直接呼び出すアプリケーションの動作モード(calc, train, count)のモジュール

mod calculator;
mod counter;
mod trainer;

pub use calculator::CalculatorApp;
pub use counter::CounterApp;
pub use trainer::TrainerApp;
