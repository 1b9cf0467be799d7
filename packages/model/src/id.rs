use crc32fast::Hasher;

/// Generate a stable document seed from the template name using CRC32
pub fn document_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for parts within a document
///
/// IDs are `{seed}-{n}` where the seed is shared by every part of the
/// document and `n` only increases, so a generator never hands out an id
/// that collides with one it already produced.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: document_seed(name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate the next sequential ID
    pub fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Advance the counter past every id already present in `ids`.
    ///
    /// Used when re-attaching a generator to a loaded document so fresh
    /// ids cannot collide with persisted ones.
    pub fn skip_past<'a>(&mut self, ids: impl Iterator<Item = &'a str>) {
        for id in ids {
            if let Some(rest) = id.strip_prefix(self.seed.as_str()) {
                if let Ok(n) = rest.trim_start_matches('-').parse::<u32>() {
                    self.count = self.count.max(n);
                }
            }
        }
    }
}
