pub mod cross_section;
pub mod flow_direction;
pub mod friction;
