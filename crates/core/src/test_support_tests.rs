// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn sample_fmdm_contains_seeded_folders() {
    let folder = sample_folder("/tmp/kb", "m1");
    let fmdm = sample_fmdm(vec![folder.clone()]);
    assert_eq!(fmdm.version, 1);
    assert_eq!(fmdm.folders, vec![folder]);
}
