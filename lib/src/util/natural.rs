use std::cmp::Ordering;

/// A run of either ASCII digits or anything else.
#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a>(&'a str);

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.0.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self.0
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.0.len());

        let (chunk, rest) = self.0.split_at(end);
        self.0 = rest;
        Some(if digits { Chunk::Digits(chunk) } else { Chunk::Text(chunk) })
    }
}

fn fold(text: &str) -> String {
    deunicode::deunicode(text).to_lowercase()
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.trim_start_matches('0'), b.trim_start_matches('0'));
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compares two names the way a person would sort them: runs of digits are
/// compared by value, text is compared without regard to case or accents.
///
/// ```
/// use std::cmp::Ordering;
/// use quire::util::natural_cmp;
///
/// assert_eq!(natural_cmp("chapter2", "chapter10"), Ordering::Less);
/// assert_eq!(natural_cmp("Zebra", "apple"), Ordering::Greater);
/// assert_eq!(natural_cmp("élan", "Elm"), Ordering::Less);
/// ```
///
/// Names that compare equal this way are ordered lowercase-first and then
/// bytewise, so the ordering is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks(a);
    let mut right = Chunks(b);
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => cmp_digits(x, y),
            (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
            (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => fold(x).cmp(&fold(y)),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    b.cmp(a)
}
