//! Dense renumbering of external identifiers
//!
//! Labels receive IDs `0, 1, 2, ...` in the order they are first seen.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::io::{BufRead, Write};

use log::info;

use crate::error::{Error, Result};

pub struct IdRemapper<K: Hash + Eq = String> {
    ids: HashMap<K, u32>,
}

impl<K: Hash + Eq> IdRemapper<K> {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
        }
    }

    /// Returns the ID of a label, assigning the next one if it is new
    pub fn assign<Q>(&mut self, label: &Q) -> Result<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(&id) = self.ids.get(label) {
            return Ok(id);
        }
        let id = u32::try_from(self.ids.len()).map_err(|_| Error::Overflow("labels"))?;
        self.ids.insert(label.to_owned(), id);
        Ok(id)
    }

    /// Returns the ID of a known label
    pub fn get<Q>(&self, label: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ids.get(label).copied()
    }

    /// Largest assigned ID (`None` if nothing was assigned)
    pub fn max_id(&self) -> Option<u32> {
        self.ids.len().checked_sub(1).map(|id| id as u32)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<K: Hash + Eq> Default for IdRemapper<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remaps the labels of each line
///
/// A line is either `<key>: <label> <label> ...` (the key is kept as is) or
/// a plain list of labels. Returns the remapper so that the caller can
/// report the largest ID.
pub fn remap_lines<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<IdRemapper> {
    let mut remapper = IdRemapper::new();

    for line in reader.lines() {
        let line = line?;
        let labels = match line.split_once(": ") {
            Some((key, labels)) => {
                write!(writer, "{}: ", key)?;
                labels
            }
            None => line.as_str(),
        };

        for (ix, label) in labels.split_whitespace().enumerate() {
            if ix > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{}", remapper.assign(label)?)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;

    match remapper.max_id() {
        Some(max_id) => info!("max token id: {}", max_id),
        None => info!("no token to remap"),
    }
    Ok(remapper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut remapper: IdRemapper = IdRemapper::new();
        assert_eq!(remapper.max_id(), None);
        assert_eq!(remapper.assign("b").unwrap(), 0);
        assert_eq!(remapper.assign("a").unwrap(), 1);
        assert_eq!(remapper.assign("b").unwrap(), 0);
        assert_eq!(remapper.assign("c").unwrap(), 2);
        assert_eq!(remapper.get("a"), Some(1));
        assert_eq!(remapper.get("z"), None);
        assert_eq!(remapper.max_id(), Some(2));
        assert_eq!(remapper.len(), 3);
    }

    #[test]
    fn test_integer_labels() {
        let mut remapper = IdRemapper::<u64>::new();
        assert_eq!(remapper.assign(&1_000_000_000_000).unwrap(), 0);
        assert_eq!(remapper.assign(&5).unwrap(), 1);
        assert_eq!(remapper.assign(&1_000_000_000_000).unwrap(), 0);
    }

    #[test]
    fn test_remap_lines() {
        let input = "10: x y\n11: y z x\nw\n";
        let mut out = Vec::new();
        let remapper = remap_lines(input.as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "10: 0 1\n11: 1 2 0\n3\n");
        assert_eq!(remapper.max_id(), Some(3));
    }

    #[test]
    fn test_fresh_per_run() {
        let mut first = Vec::new();
        remap_lines("a b\n".as_bytes(), &mut first).unwrap();
        let mut second = Vec::new();
        remap_lines("b a\n".as_bytes(), &mut second).unwrap();
        assert_eq!(first, second);
    }
}
