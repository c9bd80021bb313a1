pub mod branch;
pub mod formula;
pub mod ids;
pub mod network;
pub mod records;
pub mod structure;
