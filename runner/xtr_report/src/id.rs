//! Synthetic node ids for dialects that require them.

/// Incrementing id source, seeded at 1000.
///
/// NUnit 3 documents carry an `id` on every suite and case, while the
/// neutral tree has no identities of its own. Each write uses a fresh
/// generator, so ids are stable per document and independent of the tree.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub const SEED: u32 = 1000;

    pub fn new() -> Self {
        IdGenerator { next: Self::SEED }
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator::new()
    }
}
