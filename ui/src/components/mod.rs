pub mod describe;

mod bar_chart;
mod table;

pub use bar_chart::bar_chart;
pub use table::demand_table;
