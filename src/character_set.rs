/// Builds a 256-entry lookup table which is `true` at each byte present in
/// `bytes` and `false` everywhere else.  Usable in `const` position.
pub(crate) const fn character_set(bytes: &[u8]) -> [bool; 256] {
    let mut set = [false; 256];
    let mut i = 0;
    while i < bytes.len() {
        set[bytes[i] as usize] = true;
        i += 1;
    }
    set
}
