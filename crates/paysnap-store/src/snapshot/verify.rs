//! Snapshot integrity verification.
//!
//! Recomputes content hashes from the stored blobs using the exact
//! capture algorithm and compares against the stored value. A mismatch
//! is a reported result, never an error, so monitoring can alert without
//! crashing the read path.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::runs::require_run;
use crate::snapshot::query::{fetch_domain_blobs, list_snapshot_ids_for_run};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Outcome of verifying one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub snapshot_id: i64,
    pub valid: bool,
    pub stored_hash: String,
    pub computed_hash: String,
    pub hash_match: bool,
}

/// Aggregate verification over every snapshot of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunVerification {
    pub run_id: i64,
    pub total_snapshots: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub all_valid: bool,
    pub results: Vec<VerificationResult>,
}

/// Verify a single snapshot's content hash.
///
/// # Errors
///
/// Returns `NotFound` when the snapshot id does not exist. A hash
/// mismatch is reported through the result, not an error.
pub fn verify_snapshot(conn: &Connection, snapshot_id: i64) -> Result<VerificationResult> {
    let stored_hash: String = {
        use rusqlite::OptionalExtension;
        conn.query_row(
            "SELECT content_hash FROM payroll_snapshots WHERE id = ?1",
            [snapshot_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(crate::errors::from_rusqlite)?
        .ok_or(paysnap_core::errors::DomainError::SnapshotNotFound { snapshot_id })?
    };

    let blobs = fetch_domain_blobs(conn, snapshot_id)?;
    let computed_hash = blobs.content_hash();
    let valid = computed_hash == stored_hash;

    if valid {
        tracing::info!(
            snapshot_id = snapshot_id,
            hash_prefix = &stored_hash[..12.min(stored_hash.len())],
            "Snapshot integrity verified"
        );
    } else {
        tracing::warn!(
            snapshot_id = snapshot_id,
            stored_prefix = &stored_hash[..12.min(stored_hash.len())],
            computed_prefix = &computed_hash[..12],
            "Snapshot integrity verification failed"
        );
    }

    Ok(VerificationResult {
        snapshot_id,
        valid,
        stored_hash,
        computed_hash,
        hash_match: valid,
    })
}

/// Verify every snapshot of a run in capture order.
pub fn verify_run(conn: &Connection, run_id: i64) -> Result<RunVerification> {
    require_run(conn, run_id)?;

    let snapshot_ids = list_snapshot_ids_for_run(conn, run_id)?;

    let mut results = Vec::with_capacity(snapshot_ids.len());
    let mut valid_count = 0;
    let mut invalid_count = 0;

    for snapshot_id in &snapshot_ids {
        let result = verify_snapshot(conn, *snapshot_id)?;
        if result.valid {
            valid_count += 1;
        } else {
            invalid_count += 1;
        }
        results.push(result);
    }

    Ok(RunVerification {
        run_id,
        total_snapshots: results.len(),
        valid_count,
        invalid_count,
        all_valid: invalid_count == 0,
        results,
    })
}
