pub type TermId = u32;
pub type DocId = u32;

/// Size in bytes of one serialized integer
pub const WORD_SIZE: u64 = std::mem::size_of::<u32>() as u64;

/// Marks object that have a length
pub trait Len {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
