//! Record body decipherment for enciphered modules.
//!
//! Enciphered modules obscure every record body with the Sapphire II stream
//! cipher, seeded with the module's `CipherKey` as bytes in the module charset.

use encoding_rs::Encoding;
use log::{trace, warn};

/// Sapphire II stream cipher state.
///
/// Picture a single enigma rotor with 256 positions, rewired on the fly by
/// card-shuffling. Encryption and decryption run the same shuffle; they only
/// differ in which of the two bytes is fed back as "last cipher" and "last plain".
#[derive(Clone)]
pub struct Sapphire {
    cards: [u8; 256],
    rotor: u8,
    ratchet: u8,
    avalanche: u8,
    last_plain: u8,
    last_cipher: u8,
}

impl Sapphire {
    /// Keys the cipher. An empty key falls back to the fixed hash initialization.
    pub fn new(key: &[u8]) -> Self {
        if key.is_empty() {
            return Self::hash_init();
        }

        let mut cards = [0u8; 256];
        for (i, card) in cards.iter_mut().enumerate() {
            *card = i as u8;
        }
        let mut state = Self {
            cards,
            rotor: 0,
            ratchet: 0,
            avalanche: 0,
            last_plain: 0,
            last_cipher: 0,
        };

        // Shuffle the deck based on the key.
        let mut rsum = 0u8;
        let mut keypos = 0usize;
        for i in (0..256usize).rev() {
            let toswap = state.keyrand(i, key, &mut rsum, &mut keypos);
            state.cards.swap(i, toswap);
        }

        state.rotor = state.cards[1];
        state.ratchet = state.cards[3];
        state.avalanche = state.cards[5];
        state.last_plain = state.cards[7];
        state.last_cipher = state.cards[rsum as usize];
        state
    }

    fn hash_init() -> Self {
        let mut cards = [0u8; 256];
        for (i, card) in cards.iter_mut().enumerate() {
            *card = 255 - i as u8;
        }
        Self {
            cards,
            rotor: 1,
            ratchet: 3,
            avalanche: 5,
            last_plain: 7,
            last_cipher: 11,
        }
    }

    /// Picks a pseudo-random card index in `0..=limit` driven by the key bytes.
    fn keyrand(&self, limit: usize, key: &[u8], rsum: &mut u8, keypos: &mut usize) -> usize {
        if limit == 0 {
            return 0;
        }
        let mut mask = 1usize;
        while mask < limit {
            mask = (mask << 1) + 1;
        }
        let mut retries = 0;
        loop {
            *rsum = self.cards[*rsum as usize].wrapping_add(key[*keypos]);
            *keypos += 1;
            if *keypos >= key.len() {
                *keypos = 0;
                *rsum = rsum.wrapping_add(key.len() as u8);
            }
            let mut u = mask & *rsum as usize;
            retries += 1;
            if retries > 11 {
                u %= limit;
            }
            if u <= limit {
                return u;
            }
        }
    }

    #[inline]
    fn shuffle(&mut self) {
        self.ratchet = self.ratchet.wrapping_add(self.cards[self.rotor as usize]);
        self.rotor = self.rotor.wrapping_add(1);

        let swaptemp = self.cards[self.last_cipher as usize];
        self.cards[self.last_cipher as usize] = self.cards[self.ratchet as usize];
        self.cards[self.ratchet as usize] = self.cards[self.last_plain as usize];
        self.cards[self.last_plain as usize] = self.cards[self.rotor as usize];
        self.cards[self.rotor as usize] = swaptemp;
        self.avalanche = self.avalanche.wrapping_add(self.cards[swaptemp as usize]);
    }

    #[inline]
    fn keystream(&self) -> u8 {
        let c = &self.cards;
        let a = c[c[self.ratchet as usize].wrapping_add(c[self.rotor as usize]) as usize];
        let inner = c[self.last_plain as usize]
            .wrapping_add(c[self.last_cipher as usize])
            .wrapping_add(c[self.avalanche as usize]);
        a ^ c[c[inner as usize] as usize]
    }

    pub fn encrypt(&mut self, b: u8) -> u8 {
        self.shuffle();
        self.last_cipher = b ^ self.keystream();
        self.last_plain = b;
        self.last_cipher
    }

    pub fn decrypt(&mut self, b: u8) -> u8 {
        self.shuffle();
        self.last_plain = b ^ self.keystream();
        self.last_cipher = b;
        self.last_plain
    }
}

/// Deciphers `data` in place with a freshly keyed Sapphire state.
pub fn decipher_in_place(data: &mut [u8], key: &[u8]) {
    trace!("Deciphering {} bytes with Sapphire", data.len());
    let mut engine = Sapphire::new(key);
    for byte in data.iter_mut() {
        *byte = engine.decrypt(*byte);
    }
}

/// Enciphers `data` in place with a freshly keyed Sapphire state.
pub fn encipher_in_place(data: &mut [u8], key: &[u8]) {
    let mut engine = Sapphire::new(key);
    for byte in data.iter_mut() {
        *byte = engine.encrypt(*byte);
    }
}

/// Encodes the cipher key in the module charset.
///
/// Lenient on purpose: when the charset cannot represent the key, the key's
/// UTF-8 bytes are used instead of failing the lookup.
pub fn cipher_key_bytes(key: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, used, had_errors) = encoding.encode(key);
    if had_errors || used != encoding {
        warn!(
            "Cipher key not representable in {}; falling back to UTF-8 bytes",
            encoding.name()
        );
        return key.as_bytes().to_vec();
    }
    bytes.into_owned()
}
