use sha3::{Digest, Keccak256};

pub type Hash = [u8; 32];

pub fn keccak256(input: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Leaf for an allowlist entry: the keccak-256 hash of the tight-packed
/// wallet address bytes. Must match the off-chain allowlist generator
/// exactly or no proof will ever verify.
pub fn leaf_hash(address: &[u8]) -> Hash {
    keccak256(address)
}

/// Hashes a sibling pair in ascending byte order. Sorting before hashing
/// makes verification independent of left/right positioning, so the
/// generator and the verifier never need to agree on sibling order.
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let mut buf = [0u8; 64];
    if a <= b {
        buf[..32].copy_from_slice(a);
        buf[32..].copy_from_slice(b);
    } else {
        buf[..32].copy_from_slice(b);
        buf[32..].copy_from_slice(a);
    }
    keccak256(&buf)
}

/// Folds the proof over the leaf and compares the result with the root.
pub fn verify(root: &Hash, leaf: &Hash, proof: &[Hash]) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |acc, sibling| hash_pair(&acc, sibling));
    computed == *root
}

/// Sorted-pair Merkle tree over a fixed leaf set.
///
/// Mirrors the allowlist generator: pairs are hashed in ascending byte
/// order and an odd trailing node is carried up unhashed. Used by the
/// allowlist tooling and the test suites to produce proofs the contract
/// accepts.
pub struct MerkleTree {
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    pub fn new(leaves: Vec<Hash>) -> Self {
        let mut levels = vec![leaves];
        while levels.last().map(|level| level.len()).unwrap_or(0) > 1 {
            let current = levels.last().unwrap();
            let mut next = Vec::with_capacity((current.len() + 1) / 2);
            for pair in current.chunks(2) {
                match pair {
                    [a, b] => next.push(hash_pair(a, b)),
                    [a] => next.push(*a),
                    _ => unreachable!(),
                }
            }
            levels.push(next);
        }
        MerkleTree { levels }
    }

    pub fn root(&self) -> Option<Hash> {
        self.levels.last().and_then(|level| level.first().copied())
    }

    /// Proof for the given leaf, or None if the leaf is not in the tree.
    pub fn proof_for(&self, leaf: &Hash) -> Option<Vec<Hash>> {
        let mut index = self.levels.first()?.iter().position(|l| l == leaf)?;
        let mut proof = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = if index % 2 == 0 { index + 1 } else { index - 1 };
            if let Some(hash) = level.get(sibling) {
                proof.push(*hash);
            }
            index /= 2;
        }
        Some(proof)
    }
}
