use crate::domain::ports::Ledger;
use crate::domain::transaction::{CommittedRecord, SignedRecord, TransactionId};
use crate::error::{AgreementError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family holding committed records, keyed by commit sequence.
pub const CF_RESULTS: &str = "results";
/// Column Family mapping transaction ids to commit sequence.
pub const CF_TRANSACTIONS: &str = "transactions";
/// Column Family mapping linear ids to transaction ids.
pub const CF_LINEAR_IDS: &str = "linear_ids";

/// A persistent ledger implementation using RocksDB.
///
/// Records are stored as JSON under a big-endian commit sequence so that
/// iteration yields them in commit order. Two index column families resolve
/// transaction ids and detect duplicate linear ids.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBLedger {
    db: Arc<DB>,
    /// Serializes commits: the duplicate check and the write must not interleave.
    next_sequence: Arc<Mutex<u64>>,
}

impl RocksDBLedger {
    /// Opens or creates a RocksDB ledger at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [CF_RESULTS, CF_TRANSACTIONS, CF_LINEAR_IDS]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;
        let next_sequence = Self::last_sequence(&db)?.map_or(0, |last| last + 1);

        Ok(Self {
            db: Arc::new(db),
            next_sequence: Arc::new(Mutex::new(next_sequence)),
        })
    }

    fn cf<'a>(db: &'a DB, name: &str) -> Result<&'a ColumnFamily> {
        db.cf_handle(name).ok_or_else(|| {
            AgreementError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn last_sequence(db: &DB) -> Result<Option<u64>> {
        let cf = Self::cf(db, CF_RESULTS)?;
        match db.iterator_cf(cf, IteratorMode::End).next() {
            Some(item) => {
                let (key, _value) = item?;
                Ok(Some(decode_sequence(&key)?))
            }
            None => Ok(None),
        }
    }

    fn read_sequence(&self, sequence: &[u8]) -> Result<Option<CommittedRecord>> {
        let cf = Self::cf(&self.db, CF_RESULTS)?;
        match self.db.get_cf(&cf, sequence)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

fn decode_sequence(key: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = key.try_into().map_err(|_| {
        AgreementError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Malformed sequence key of {} bytes", key.len()),
        )))
    })?;
    Ok(u64::from_be_bytes(bytes))
}

#[async_trait]
impl Ledger for RocksDBLedger {
    async fn commit(&self, record: SignedRecord) -> Result<TransactionId> {
        let id = record.id()?;
        let linear_id = record.record.linear_id.clone();

        let mut next_sequence = self.next_sequence.lock().await;
        let results = Self::cf(&self.db, CF_RESULTS)?;
        let transactions = Self::cf(&self.db, CF_TRANSACTIONS)?;
        let linear_ids = Self::cf(&self.db, CF_LINEAR_IDS)?;
        if self
            .db
            .get_pinned_cf(&linear_ids, linear_id.as_str())?
            .is_some()
        {
            return Err(AgreementError::DuplicateRecord(linear_id));
        }

        let sequence = next_sequence.to_be_bytes();
        let committed = CommittedRecord {
            id: id.clone(),
            signed: record,
        };
        let value = serde_json::to_vec(&committed)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&results, sequence, value);
        batch.put_cf(&transactions, id.as_str(), sequence);
        batch.put_cf(&linear_ids, linear_id.as_str(), id.as_str());
        self.db.write(batch)?;

        *next_sequence += 1;
        Ok(id)
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<CommittedRecord>> {
        let transactions = Self::cf(&self.db, CF_TRANSACTIONS)?;
        match self.db.get_cf(&transactions, id.as_str())? {
            Some(sequence) => self.read_sequence(&sequence),
            None => Ok(None),
        }
    }

    async fn all_results(&self) -> Result<Vec<CommittedRecord>> {
        let cf = Self::cf(&self.db, CF_RESULTS)?;
        let mut committed = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            committed.push(serde_json::from_slice(&value)?);
        }
        Ok(committed)
    }
}
