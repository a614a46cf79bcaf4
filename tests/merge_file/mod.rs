mod fail_for_missing_base;
mod merge_identical_changes_cleanly;
