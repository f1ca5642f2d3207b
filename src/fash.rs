// Copyright (C) 2020-2026 Andy Kurnia.

// Fast insecure non-cryptographic hash, for cache keys made of small
// integers and board bytes.

pub struct MyHasher(u64);

impl std::hash::Hasher for MyHasher {
    #[inline(always)]
    fn finish(&self) -> u64 {
        // fold the high bits down so bucket selection sees them.
        self.0 ^ (self.0 >> 29)
    }

    #[inline(always)]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(3467)).0 ^ (!b as u64);
        }
    }

    #[inline(always)]
    fn write_u8(&mut self, i: u8) {
        self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(3467)).0 ^ (!i as u64);
    }

    #[inline(always)]
    fn write_u32(&mut self, i: u32) {
        self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(0x9e37_79b9)).0 ^ (i as u64);
    }
}

impl Default for MyHasher {
    fn default() -> MyHasher {
        MyHasher(0)
    }
}

pub type MyHasherDefault = std::hash::BuildHasherDefault<MyHasher>;
pub type MyHashMap<K, V> = std::collections::HashMap<K, V, MyHasherDefault>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::{BuildHasher, Hash, Hasher};

    fn hash_of<T: Hash>(x: &T) -> u64 {
        let mut h = MyHasherDefault::default().build_hasher();
        x.hash(&mut h);
        h.finish()
    }

    #[test]
    fn equal_keys_hash_equal() {
        assert_eq!(hash_of(&([3u8; 25], 15u8)), hash_of(&([3u8; 25], 15u8)));
    }

    #[test]
    fn nearby_keys_differ() {
        let mut board = [0u8; 25];
        let a = hash_of(&(board, 15u8));
        board[24] = 1;
        assert_ne!(a, hash_of(&(board, 15u8)));
        assert_ne!(hash_of(&(board, 15u8)), hash_of(&(board, 16u8)));
    }
}
