//! Type 0 — DIRECT_TARGET (§4.6): the root URL itself is the only candidate
//! target. `max_depth` MUST be 0, so this policy never produces children.

use crate::browser::{is_document_content_type, probe_content_type, HAS_DOCUMENT_EXTENSION_PATTERN};
use crate::storage::FrontierEntry;
use crate::strategy::{DispatchOutcome, ExecutionContext};
use crate::url::is_target;
use crate::FrontierError;
use regex::Regex;

pub async fn execute(entry: &FrontierEntry, ctx: &mut ExecutionContext<'_>) -> crate::Result<DispatchOutcome> {
    if !is_target(&entry.url, &entry.target_patterns) {
        return Ok(DispatchOutcome::default());
    }

    let probe = probe_content_type(&entry.url, ctx.user_agent).await?;

    if probe.status_code != 200 {
        return Err(FrontierError::HttpStatus {
            url: entry.url.clone(),
            status: probe.status_code,
        });
    }

    let extension_re = Regex::new(HAS_DOCUMENT_EXTENSION_PATTERN).expect("valid built-in pattern");
    let verified = match &probe.content_type {
        Some(ct) => is_document_content_type(ct) || extension_re.is_match(&entry.url),
        None => extension_re.is_match(&entry.url),
    };

    if !verified {
        return Ok(DispatchOutcome::default());
    }

    ctx.store.set_is_target(entry.id, true)?;
    Ok(DispatchOutcome {
        targets_found: 1,
        seeds_found: 0,
        failed: 0,
        child_seeds: Vec::new(),
    })
}
