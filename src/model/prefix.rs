//! Domain-separation tags for hashed objects
//!
//! Every hashable object kind mixes a distinct 4-byte tag into the digest
//! ahead of its payload. Two different kinds can therefore never hash to the
//! same value, even when their serialized bytes are identical.

/// 4-byte tag identifying the kind of a hashed object
///
/// Values are the protocol's ASCII mnemonics padded with a zero byte and
/// must match peer implementations exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum HashPrefix {
    /// Inner node of a hash tree
    InnerNode = 0x4d49_4e00, // MIN\0
    /// Leaf node carrying a ledger entry
    LeafNode = 0x4d4c_4e00, // MLN\0
    /// Transaction identifier; also tags plain transaction leaves
    TransactionId = 0x5458_4e00, // TXN\0
    /// Leaf node carrying a transaction with execution metadata
    TransactionNode = 0x534e_4400, // SND\0
    /// Pre-image of a transaction being signed
    TransactionSign = 0x5354_5800, // STX\0
    /// Ledger header
    LedgerHeader = 0x4c57_5200, // LWR\0
    /// Validation vote
    Validation = 0x5641_4c00, // VAL\0
    /// Consensus proposal
    Proposal = 0x5052_5000, // PRP\0
}

impl HashPrefix {
    /// Every registered prefix; a new hashable kind must be added here
    pub const ALL: [HashPrefix; 8] = [
        HashPrefix::InnerNode,
        HashPrefix::LeafNode,
        HashPrefix::TransactionId,
        HashPrefix::TransactionNode,
        HashPrefix::TransactionSign,
        HashPrefix::LedgerHeader,
        HashPrefix::Validation,
        HashPrefix::Proposal,
    ];

    /// The tag bytes as they enter the digest
    pub fn as_bytes(self) -> [u8; 4] {
        (self as u32).to_be_bytes()
    }
}
