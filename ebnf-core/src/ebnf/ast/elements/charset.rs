/// An ordered set of characters, optionally negated.
///
/// Duplicates are dropped on construction, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    chars: Vec<char>,
    negative: bool,
}

impl CharSet {
    pub fn new(chars: impl IntoIterator<Item = char>, negative: bool) -> Self {
        let mut unique = Vec::new();
        for c in chars {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        Self {
            chars: unique,
            negative,
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }
}
