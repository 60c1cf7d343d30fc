pub mod page;
pub mod plot;
