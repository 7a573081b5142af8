//! [Unicode § 3.12 Conjoining Jamo Behavior](https://www.unicode.org/versions/latest/ch03.pdf)
//!
//! Precomposed Hangul syllables decompose into, and compose from, Leading
//! consonant (L), Vowel (V) and optional Trailing consonant (T) jamo by
//! arithmetic alone.

/// First precomposed syllable, U+AC00.
pub const S_BASE: u32 = 0xAC00;
/// First leading consonant, U+1100.
pub const L_BASE: u32 = 0x1100;
/// First vowel, U+1161.
pub const V_BASE: u32 = 0x1161;
/// One before the first trailing consonant (U+11A8); `T_BASE + 0` means "no
/// trailing consonant".
pub const T_BASE: u32 = 0x11A7;
/// Number of leading consonants.
pub const L_COUNT: u32 = 19;
/// Number of vowels.
pub const V_COUNT: u32 = 21;
/// Number of trailing slots, including the empty one.
pub const T_COUNT: u32 = 28;
/// Syllables per leading consonant.
pub const N_COUNT: u32 = V_COUNT * T_COUNT;
/// Number of precomposed syllables.
pub const S_COUNT: u32 = L_COUNT * N_COUNT;

/// The jamo of one precomposed syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    /// Leading consonant (L).
    pub leading: char,
    /// Vowel (V).
    pub vowel: char,
    /// Trailing consonant (T), absent for LV syllables.
    pub trailing: Option<char>,
}

impl Syllable {
    /// Number of jamo: 2 for LV, 3 for LVT.
    #[must_use]
    pub(crate) const fn len(&self) -> usize {
        if self.trailing.is_some() { 3 } else { 2 }
    }

    /// The jamo in order.
    pub fn jamo(self) -> impl Iterator<Item = char> {
        [Some(self.leading), Some(self.vowel), self.trailing]
            .into_iter()
            .flatten()
    }
}

fn to_char(cp: u32) -> Option<char> {
    char::from_u32(cp)
}

/// Whether `ch` is a precomposed syllable in U+AC00..=U+D7A3.
#[must_use]
pub const fn is_syllable(ch: char) -> bool {
    (ch as u32).wrapping_sub(S_BASE) < S_COUNT
}

/// [§ 3.12 Hangul Syllable Decomposition](https://www.unicode.org/versions/latest/ch03.pdf)
///
/// ```text
/// SIndex = s - SBase
/// LIndex = SIndex div NCount
/// VIndex = (SIndex mod NCount) div TCount
/// TIndex = SIndex mod TCount
/// ```
///
/// Returns `None` for anything that is not a precomposed syllable.
#[must_use]
pub fn decompose(ch: char) -> Option<Syllable> {
    if !is_syllable(ch) {
        return None;
    }

    let s_index = ch as u32 - S_BASE;
    let t_index = s_index % T_COUNT;
    let lv_index = (s_index - t_index) / T_COUNT;

    Some(Syllable {
        leading: to_char(L_BASE + lv_index / V_COUNT)?,
        vowel: to_char(V_BASE + lv_index % V_COUNT)?,
        trailing: if t_index == 0 {
            None
        } else {
            Some(to_char(T_BASE + t_index)?)
        },
    })
}

/// [§ 3.12 Hangul Syllable Composition](https://www.unicode.org/versions/latest/ch03.pdf)
///
/// Composes `L + V` into an LV syllable and `LV + T` into an LVT syllable.
/// Returns `None` for any other pair, including an LVT syllable followed by
/// another trailing consonant.
#[must_use]
pub fn compose(first: char, second: char) -> Option<char> {
    let first = first as u32;
    let second = second as u32;

    // STEP 1: L + V
    let l_index = first.wrapping_sub(L_BASE);
    let v_index = second.wrapping_sub(V_BASE);
    if l_index < L_COUNT && v_index < V_COUNT {
        return to_char(S_BASE + (l_index * V_COUNT + v_index) * T_COUNT);
    }

    // STEP 2: LV + T, where the syllable's trailing slot is empty and T is a
    // real trailing consonant (not T_BASE itself).
    let s_index = first.wrapping_sub(S_BASE);
    let t_index = second.wrapping_sub(T_BASE);
    if s_index < S_COUNT && s_index % T_COUNT == 0 && (1..T_COUNT).contains(&t_index) {
        return to_char(first + t_index);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_lv() {
        // U+AC00 HANGUL SYLLABLE GA
        let syllable = decompose('\u{AC00}');
        assert_eq!(
            syllable,
            Some(Syllable {
                leading: '\u{1100}',
                vowel: '\u{1161}',
                trailing: None,
            })
        );
    }

    #[test]
    fn test_decompose_lvt() {
        // U+D4DB HANGUL SYLLABLE PWILH
        let syllable = decompose('\u{D4DB}');
        assert_eq!(
            syllable.map(|s| s.jamo().collect::<Vec<_>>()),
            Some(vec!['\u{1111}', '\u{1171}', '\u{11B6}'])
        );
    }

    #[test]
    fn test_decompose_rejects_non_syllables() {
        assert_eq!(decompose('a'), None);
        assert_eq!(decompose('\u{D7A4}'), None);
        assert_eq!(decompose('\u{ABFF}'), None);
    }

    #[test]
    fn test_compose() {
        assert_eq!(compose('\u{1100}', '\u{1161}'), Some('\u{AC00}'));
        assert_eq!(compose('\u{AC00}', '\u{11A8}'), Some('\u{AC01}'));
        // LVT + T does not compose.
        assert_eq!(compose('\u{AC01}', '\u{11A8}'), None);
        // T_BASE itself is not a trailing consonant.
        assert_eq!(compose('\u{AC00}', '\u{11A7}'), None);
        assert_eq!(compose('a', '\u{1161}'), None);
    }

    #[test]
    fn test_round_trip_every_syllable() {
        for cp in S_BASE..S_BASE + S_COUNT {
            let ch = char::from_u32(cp).unwrap();
            let syllable = decompose(ch).unwrap();
            let lv = compose(syllable.leading, syllable.vowel).unwrap();
            let composed = match syllable.trailing {
                Some(t) => compose(lv, t).unwrap(),
                None => lv,
            };
            assert_eq!(composed, ch);
        }
    }
}
