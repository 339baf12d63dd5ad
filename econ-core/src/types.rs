use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use tsify_next::Tsify;

// ============================================================================
// IDs - Using slotmap for generational indices
// ============================================================================

new_key_type! {
    pub struct FirmId;
    pub struct IndividualId;
}

/// Trait for converting SlotMap keys to u64 for the WASM boundary
pub trait KeyToU64 {
    fn to_u64(self) -> u64;
}

impl KeyToU64 for FirmId {
    fn to_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

impl KeyToU64 for IndividualId {
    fn to_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

// ============================================================================
// Goods - The two commodities that flow through the economy
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Good {
    /// Intermediate good grown by producers, consumed by processors
    RawMaterial,
    /// Finished good sold by processors, eaten by individuals
    ConsumerGood,
}

// ============================================================================
// Firm roles
// ============================================================================

/// Which tier of the production chain a firm occupies. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum FirmRole {
    RawMaterialProducer,
    Processor,
}

impl FirmRole {
    /// The good a firm of this role posts for sale
    pub fn sells(self) -> Good {
        match self {
            FirmRole::RawMaterialProducer => Good::RawMaterial,
            FirmRole::Processor => Good::ConsumerGood,
        }
    }

    /// Starting skill an individual brings to this role
    pub fn base_skill(self) -> f64 {
        match self {
            FirmRole::RawMaterialProducer => 1.0,
            FirmRole::Processor => 2.0,
        }
    }
}

// ============================================================================
// Scalar aliases
// ============================================================================

pub type Money = f64;
pub type Price = f64;
pub type Quantity = f64;
