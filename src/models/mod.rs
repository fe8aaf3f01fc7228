mod demo_data;
mod raqueta;

pub use demo_data::demo_raquetas;
pub use raqueta::{NewRaquetaRow, Raqueta, RaquetaChanges, RaquetaChangeset, RaquetaRow};
