//! Per-path merge resolution
//!
//! Each path is resolved from the blob identities it has at the split
//! point, on the current branch and on the given branch. "Changed" always
//! means changed relative to the split point; a path absent on a side
//! counts as changed when the split point tracked it.
//!
//! The rules, with `s`/`c`/`g` the split, current and given blob ids:
//!
//! - `c == g`: both sides agree, keep the current side as is
//! - changed only on the given side: take the given side, which is a
//!   removal when the given side no longer tracks the path
//! - changed only on the current side: keep the current side
//! - changed on both sides to different contents: conflict

use crate::artifacts::objects::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeSet;

/// Outcome of merging a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Current side already has the right content, leave it alone
    KeepCurrent,
    /// Given side wins, take its blob
    TakeGiven,
    /// Given side removed the path and the current side left it untouched
    Remove,
    /// Both sides changed the path to different contents
    Conflict,
}

/// Resolve one path from its three blob identities
///
/// Returns `None` when no manifest tracks the path at all.
pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Option<Resolution> {
    if split.is_none() && current.is_none() && given.is_none() {
        return None;
    }

    // covers both sides present with equal content, and both sides
    // having removed a path the split point tracked
    if current == given {
        return Some(Resolution::KeepCurrent);
    }

    let Some(split) = split else {
        // path born after the split point, on one or both sides
        return Some(match (current, given) {
            (None, Some(_)) => Resolution::TakeGiven,
            (Some(_), None) => Resolution::KeepCurrent,
            _ => Resolution::Conflict,
        });
    };

    let current_changed = current != Some(split);
    let given_changed = given != Some(split);

    Some(match (current_changed, given_changed) {
        (false, true) if given.is_none() => Resolution::Remove,
        (false, true) => Resolution::TakeGiven,
        (true, false) => Resolution::KeepCurrent,
        _ => Resolution::Conflict,
    })
}

/// Full per-path plan for one merge
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// Paths to overwrite with the given side's blob
    pub take_given: Vec<(String, ObjectId)>,
    /// Paths to remove from the workspace and untrack
    pub removals: Vec<String>,
    /// Paths both sides changed incompatibly
    pub conflicts: Vec<String>,
}

impl MergePlan {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Classify every path tracked by any of the three manifests
///
/// Paths resolving to `KeepCurrent` need no action and are omitted. The
/// plan's vectors come out in path order.
pub fn plan(split: &Manifest, current: &Manifest, given: &Manifest) -> MergePlan {
    let paths: BTreeSet<&String> = split
        .keys()
        .chain(current.keys())
        .chain(given.keys())
        .collect();

    let mut plan = MergePlan::default();

    for path in paths {
        match classify(split.get(path), current.get(path), given.get(path)) {
            Some(Resolution::TakeGiven) => {
                let blob_id = given[path].clone();
                plan.take_given.push((path.clone(), blob_id));
            }
            Some(Resolution::Remove) => plan.removals.push(path.clone()),
            Some(Resolution::Conflict) => plan.conflicts.push(path.clone()),
            Some(Resolution::KeepCurrent) | None => {}
        }
    }

    plan
}

/// Render the marker file for a conflicted path
///
/// A side that deleted the path contributes empty content. Sides are
/// newline-terminated before the next marker so markers always start at
/// column zero.
pub fn conflict_file(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let mut out = Vec::new();

    out.extend_from_slice(b"<<<<<<< HEAD\n");
    push_side(&mut out, current);
    out.extend_from_slice(b"=======\n");
    push_side(&mut out, given);
    out.extend_from_slice(b">>>>>>>\n");

    out.into()
}

fn push_side(out: &mut Vec<u8>, content: Option<&[u8]>) {
    if let Some(content) = content {
        out.extend_from_slice(content);
        if !content.is_empty() && !content.ends_with(b"\n") {
            out.push(b'\n');
        }
    }
}
