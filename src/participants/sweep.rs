use std::time::Duration;

use sqlx::SqlitePool;
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

use crate::{
    db::{self, MessageKind, Participant, BROADCAST},
    messages::insert_message,
    AppResult,
};

use super::LEAVE_TEXT;

/// Evicts every participant silent for longer than `inactivity` as of `now`
/// (epoch millis) and announces each departure. Returns how many left.
///
/// Failures are logged per participant and never stop the pass.
pub async fn sweep(db_pool: &SqlitePool, inactivity: Duration, now: i64) -> usize {
    let inactivity = i64::try_from(inactivity.as_millis()).unwrap_or(i64::MAX);
    let cutoff = now.saturating_sub(inactivity);

    let participants: Vec<Participant> =
        match sqlx::query_as("SELECT name,last_status FROM participants")
            .fetch_all(db_pool)
            .await
        {
            Ok(participants) => participants,
            Err(err) => {
                tracing::warn!(error = %err, "sweep: could not list participants");
                return 0;
            }
        };

    let mut evicted = 0;
    for Participant { name, .. } in participants.into_iter().filter(|p| p.last_status < cutoff) {
        match evict(db_pool, &name, cutoff).await {
            Ok(true) => {
                evicted += 1;
                tracing::info!(%name, "participant left after inactivity");
            }
            Ok(false) => {}
            Err(err) => tracing::warn!(%name, error = %err, "sweep: eviction failed"),
        }
    }

    evicted
}

// false when the participant sent a heartbeat or was removed since the listing
async fn evict(db_pool: &SqlitePool, name: &str, cutoff: i64) -> AppResult<bool> {
    let deleted = sqlx::query("DELETE FROM participants WHERE name=? AND last_status<?")
        .bind(name)
        .bind(cutoff)
        .execute(db_pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Ok(false);
    }

    insert_message(db_pool, name, BROADCAST, LEAVE_TEXT, MessageKind::Status).await?;
    Ok(true)
}

/// Runs [`sweep`] every `period` until the returned handle is aborted.
pub fn spawn_sweeper(db_pool: SqlitePool, period: Duration, inactivity: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let evicted = sweep(&db_pool, inactivity, db::now_millis()).await;
            tracing::debug!(evicted, "sweep finished");
        }
    })
}
