use anyhow::Context;
use parking_lot::Mutex;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::Path;
use thiserror::Error;

use crate::shared::config::CONFIG;

/// Cursors handing out unique, strictly ordered sequence numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    UserWrite,
    UserRead,
    ProductWrite,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("user read index {index} is past the email pool (len {len})")]
    EmailIndexOutOfRange { index: u64, len: usize },
}

struct Indexes {
    user_write: u64,
    user_read: u64,
    product_write: u64,
    emails: Vec<String>,
}

/// Shared state consumed by every simulated user: the three cursors, the
/// email pool, and the fixed product-read sample.
///
/// One lock covers both the cursors and the pool, so a cursor claim and the
/// pool access it implies are a single atomic step. A claimed read index is
/// therefore always backed by an email, and `push_email` makes the new email
/// readable in the same step that issues its write index.
pub struct TestContext {
    indexes: Mutex<Indexes>,
    product_read_ids: Vec<u64>,
}

impl TestContext {
    pub fn new(seed_emails: Vec<String>, write_start: u64, product_read_ids: Vec<u64>) -> Self {
        Self {
            indexes: Mutex::new(Indexes {
                user_write: write_start,
                user_read: 0,
                product_write: write_start,
                emails: seed_emails,
            }),
            product_read_ids,
        }
    }

    pub fn from_config() -> anyhow::Result<Self> {
        let g = &CONFIG.generator;
        let seeds = load_seed_emails(Path::new(&CONFIG.target.seed_file))?;
        let ids = sample_product_ids(g.product_id_min, g.product_id_max, g.product_sample_size);
        Ok(Self::new(seeds, g.write_start_index, ids))
    }

    /// Atomically read-and-increment the given cursor.
    pub fn claim(&self, cursor: Cursor) -> u64 {
        let mut ix = self.indexes.lock();
        let slot = match cursor {
            Cursor::UserWrite => &mut ix.user_write,
            Cursor::UserRead => &mut ix.user_read,
            Cursor::ProductWrite => &mut ix.product_write,
        };
        let now = *slot;
        *slot += 1;
        now
    }

    /// Claim the next user-read index and the email at that position in one
    /// locked step. An exhausted pool fails without advancing the cursor, so
    /// the read resumes once more emails have been appended.
    pub fn claim_user_read(&self) -> Result<(u64, String), ContextError> {
        let mut ix = self.indexes.lock();
        let read_now = ix.user_read;
        if read_now as usize >= ix.emails.len() {
            return Err(ContextError::EmailIndexOutOfRange {
                index: read_now,
                len: ix.emails.len(),
            });
        }
        ix.user_read += 1;
        Ok((read_now, ix.emails[read_now as usize].clone()))
    }

    /// Append a freshly written email and claim its user-write index in one
    /// locked step.
    pub fn push_email(&self, email: String) -> u64 {
        let mut ix = self.indexes.lock();
        let write_now = ix.user_write;
        ix.user_write += 1;
        ix.emails.push(email);
        write_now
    }

    /// Uniform pick from the startup product-read sample; consumes no cursor.
    pub fn pick_product_id(&self) -> u64 {
        let mut rng = rand::thread_rng();
        *self
            .product_read_ids
            .choose(&mut rng)
            .expect("product read sample is non-empty")
    }

    pub fn email_pool_len(&self) -> usize {
        self.indexes.lock().emails.len()
    }

    pub fn product_read_ids(&self) -> &[u64] {
        &self.product_read_ids
    }
}

/// Load the seed emails from a CSV file with an `email` column.
pub fn load_seed_emails(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open seed file {}", path.display()))?;
    let email_col = rdr
        .headers()?
        .iter()
        .position(|h| h == "email")
        .with_context(|| format!("seed file {} has no `email` column", path.display()))?;

    let mut emails = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(value) = record.get(email_col) {
            if !value.is_empty() {
                emails.push(value.to_string());
            }
        }
    }
    Ok(emails)
}

/// Draw the fixed product-read sample once, uniformly from [min, max).
pub fn sample_product_ids(min: u64, max: u64, count: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen_range(min..max)).collect()
}
