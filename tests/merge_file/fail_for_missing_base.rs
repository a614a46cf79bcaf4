use crate::common::command::{merge_files_dir, run_bit_merge_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn fail_for_missing_base(merge_files_dir: TempDir) {
    run_bit_merge_command(
        merge_files_dir.path(),
        &["merge-file", "current.txt", "missing.txt", "other.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("could not read missing.txt"));

    pretty_assertions::assert_eq!(
        read_file(&merge_files_dir.path().join("current.txt")),
        "apple\nblueberry\ncherry\ndate\n"
    );
}
