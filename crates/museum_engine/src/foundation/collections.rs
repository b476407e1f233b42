//! Handle types and handle-keyed storage

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Identity of a loaded mesh
    pub struct ModelId;

    /// Identity of a loaded texture
    pub struct TextureHandle;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;
