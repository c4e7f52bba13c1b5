use rand::{thread_rng, Rng};

const ROOM_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Returns a random string of uppercase letters and digits.
pub fn random_room_token(length: usize) -> String {
    let mut rng = thread_rng();

    std::iter::repeat(())
        .map(|_| ROOM_ID_ALPHABET[rng.gen_range(0..ROOM_ID_ALPHABET.len())] as char)
        .take(length)
        .collect()
}
