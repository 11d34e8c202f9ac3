//! Opaque object identifiers.
//!
//! Every handle the facade returns is a 64-bit value packing a type tag
//! into the high 16 bits and a 48-bit resource index into the low bits:
//!
//! ```text
//! 63.......48 | 47..................................0
//!    type     |             resource index
//! ```

use std::fmt;

/// Number of bits reserved for the resource index.
const INDEX_BITS: u32 = 48;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

/// Object type tag carried in the high 16 bits of an [`ObjectId`].
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Switch = 1,
    Port = 2,
    Vlan = 3,
    VlanMember = 4,
    BridgePort = 5,
}

impl ObjectType {
    /// Decodes a raw type tag.
    pub fn from_raw(tag: u16) -> Option<Self> {
        match tag {
            1 => Some(ObjectType::Switch),
            2 => Some(ObjectType::Port),
            3 => Some(ObjectType::Vlan),
            4 => Some(ObjectType::VlanMember),
            5 => Some(ObjectType::BridgePort),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectType::Switch => "Switch",
            ObjectType::Port => "Port",
            ObjectType::Vlan => "Vlan",
            ObjectType::VlanMember => "VlanMember",
            ObjectType::BridgePort => "BridgePort",
        };
        write!(f, "{}", s)
    }
}

/// An opaque 64-bit object identifier.
///
/// Encoding and decoding are pure bit operations and mutually inverse for
/// every index below 2^48.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectId(u64);

impl ObjectId {
    /// The null object ID.
    pub const NULL: ObjectId = ObjectId(0);

    /// Encodes a type tag and resource index into an object ID.
    ///
    /// Index bits above the low 48 are discarded.
    pub const fn encode(object_type: ObjectType, index: u64) -> Self {
        ObjectId(((object_type as u64) << INDEX_BITS) | (index & INDEX_MASK))
    }

    /// Creates an object ID from its raw 64-bit representation.
    pub const fn from_raw(raw: u64) -> Self {
        ObjectId(raw)
    }

    /// Returns the raw 64-bit representation.
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// Decodes the type tag, if it names a known object type.
    pub fn object_type(&self) -> Option<ObjectType> {
        ObjectType::from_raw((self.0 >> INDEX_BITS) as u16)
    }

    /// Returns the low-order 48-bit resource index.
    pub const fn index(&self) -> u64 {
        self.0 & INDEX_MASK
    }

    /// Returns true if this is the null object ID.
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.object_type() {
            Some(t) => write!(f, "{}(0x{:016x})", t, self.0),
            None => write!(f, "ObjectId(0x{:016x})", self.0),
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}
