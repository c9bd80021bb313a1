use slotmap::new_key_type;

new_key_type! {
    pub struct BranchId;
    pub struct CompositeId;
    pub struct StructureId;
}
