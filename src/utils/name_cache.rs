use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

/// person id -> display name, for archive snapshots and board rendering
pub static NAME_CACHE: Lazy<Cache<String, String>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000) // a single site never has this many persons
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Remember a person's display name
pub async fn remember(person_id: &str, display_name: &str) {
    NAME_CACHE
        .insert(person_id.to_string(), display_name.to_string())
        .await;
}

/// Cached display name, if any
pub async fn lookup(person_id: &str) -> Option<String> {
    NAME_CACHE.get(person_id).await
}

/// Drop a cached name (after rename or unenrollment)
pub async fn forget(person_id: &str) {
    NAME_CACHE.invalidate(person_id).await;
}

/// Batch remember id/name pairs
async fn batch_remember(pairs: &[(String, String)]) {
    let futures: Vec<_> = pairs
        .iter()
        .map(|(id, name)| NAME_CACHE.insert(id.clone(), name.clone()))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Load active persons' names into the in-memory cache (batched)
pub async fn warmup_name_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT id, display_name
        FROM persons
        WHERE status = 'active'
        ORDER BY enrolled_on DESC
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (id, display_name) = row?;
        batch.push((id, display_name));
        total_count += 1;

        if batch.len() >= batch_size {
            batch_remember(&batch).await;
            batch.clear();
        }
    }

    // Insert any remaining pairs
    if !batch.is_empty() {
        batch_remember(&batch).await;
    }

    log::info!("Name cache warmup complete: {} active persons", total_count);

    Ok(())
}
