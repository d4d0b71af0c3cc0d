use anyhow::{Result, anyhow};
use autoscale_cuckoo_filter::CuckooFilter;
use futures::StreamExt;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::sync::RwLock;

/// Expected capacity and false-positive rate.
/// Tune these based on real enrollment counts.
const FILTER_CAPACITY: usize = 10_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

static PERSON_FILTER: Lazy<RwLock<CuckooFilter<String>>> =
    Lazy::new(|| RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)));

/// Check if a person id might be enrolled (false positives possible).
/// A miss only downgrades a toggle to the "Unknown" display name, so the
/// approximate answer is enough here.
pub fn might_exist(person_id: &str) -> bool {
    PERSON_FILTER
        .read()
        .expect("person filter poisoned")
        .contains(&person_id.to_string())
}

/// Insert a single person id into the filter
pub fn insert(person_id: &str) {
    PERSON_FILTER
        .write()
        .expect("person filter poisoned")
        .add(&person_id.to_string());
}

/// Remove a person id from the filter
pub fn remove(person_id: &str) {
    PERSON_FILTER
        .write()
        .expect("person filter poisoned")
        .remove(&person_id.to_string());
}

/// Warm up the person filter using streaming + batching
pub async fn warmup_person_filter(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String,)>("SELECT id FROM persons").fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0usize;

    while let Some(row) = stream.next().await {
        let (id,) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;

        batch.push(id);
        total += 1;

        if batch.len() == batch_size {
            insert_batch(&batch);
            batch.clear();
        }
    }

    if !batch.is_empty() {
        insert_batch(&batch);
    }

    log::info!("Person filter warmup complete: {} persons", total);
    Ok(())
}

/// Insert a batch of person ids
fn insert_batch(ids: &[String]) {
    let mut filter = PERSON_FILTER.write().expect("person filter poisoned");

    for id in ids {
        filter.add(id);
    }
}
