pub mod layout;
pub mod precision;
pub mod table;

pub use layout::CombLayout;
pub use precision::Precision;
pub use table::CombTable;
