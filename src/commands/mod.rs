pub mod export;
pub mod import;
pub mod pairs;
pub mod settings;
pub mod stats;
pub mod trades;

pub use export::*;
pub use import::*;
pub use pairs::*;
pub use settings::*;
pub use stats::*;
pub use trades::*;
