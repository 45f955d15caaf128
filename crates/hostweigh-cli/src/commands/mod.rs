pub mod rank;
pub mod weighers;
